//! Splitting of oversized communities into bounded clusters

use crate::cluster::{Cluster, Communities};
use crate::error::{SplitError, SplitResult};

/// Largest cluster size allowed after normalization: `floor(N / K) - delta`
pub fn size_threshold(node_count: usize, num_clients: usize, delta: usize) -> SplitResult<usize> {
    let even_share = node_count.checked_div(num_clients).unwrap_or(0);
    match even_share.checked_sub(delta) {
        Some(threshold) if threshold > 0 => Ok(threshold),
        _ => Err(SplitError::InvalidBalanceParameters {
            node_count,
            num_clients,
            delta,
        }),
    }
}

/// Turn communities into clusters no larger than the size threshold.
///
/// An oversized community loses prefix slices of exactly `threshold` members,
/// each becoming a new cluster with a fresh id above every community label,
/// until its remainder fits. Member order is the order of `communities.groups()`.
pub fn normalize(
    communities: &Communities,
    num_clients: usize,
    delta: usize,
) -> SplitResult<Vec<Cluster>> {
    let node_count = communities.len();
    if node_count == 0 {
        return Err(SplitError::EmptyGraph);
    }
    let threshold = size_threshold(node_count, num_clients, delta)?;

    let groups = communities.groups();
    let mut next_id = groups.keys().next_back().map_or(0, |&label| label + 1);

    let mut clusters = Vec::with_capacity(groups.len());
    let mut peeled = Vec::new();

    for (label, mut members) in groups {
        if members.len() > threshold {
            log::debug!(
                "Splitting community {} of {} members into chunks of {}",
                label,
                members.len(),
                threshold
            );
        }

        while members.len() > threshold {
            let rest = members.split_off(threshold);
            peeled.push(Cluster::new(next_id, members));
            next_id += 1;
            members = rest;
        }
        clusters.push(Cluster::new(label, members));
    }

    log::info!(
        "Normalized {} communities into {} clusters (threshold {})",
        clusters.len(),
        clusters.len() + peeled.len(),
        threshold
    );

    clusters.extend(peeled);
    Ok(clusters)
}
