//! Capacity-aware distribution of clusters across clients

use itertools::Itertools;

use crate::cluster::Cluster;
use crate::error::{SplitError, SplitResult};

/// Soft per-client node budget: `floor(N / K) + delta`
pub fn client_capacity(node_count: usize, num_clients: usize, delta: usize) -> usize {
    node_count.checked_div(num_clients).unwrap_or(0) + delta
}

/// Node ids owned by each client, in the order clusters were handed out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantAssignment {
    clients: Vec<Vec<u32>>,
    capacity: usize,
    overflow: Option<usize>,
}

impl ParticipantAssignment {
    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn client(&self, idx: usize) -> &[u32] {
        &self.clients[idx]
    }

    pub fn clients(&self) -> &[Vec<u32>] {
        &self.clients
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Client that absorbed clusters no other client had room for, if any
    pub fn overflow_client(&self) -> Option<usize> {
        self.overflow
    }

    /// Nodes the overflow client holds beyond capacity
    pub fn overflow_excess(&self) -> usize {
        self.overflow
            .map_or(0, |client| self.clients[client].len().saturating_sub(self.capacity))
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.clients.iter().map(|nodes| nodes.len()).collect()
    }

    /// Owning client of each node id in `0..node_count`
    pub fn owners(&self, node_count: usize) -> Vec<u32> {
        let mut owner = vec![u32::MAX; node_count];
        for (client, nodes) in self.clients.iter().enumerate() {
            for &node in nodes {
                owner[node as usize] = client as u32;
            }
        }
        owner
    }

    pub fn into_clients(self) -> Vec<Vec<u32>> {
        self.clients
    }
}

/// Hand clusters to clients, largest first, cycling round-robin.
///
/// A client is skipped while taking the cluster would push it past capacity.
/// When a full cycle finds no room, the cluster goes to a single overflow
/// client (the least loaded one at the time of the first overflow).
pub fn assign(
    clusters: Vec<Cluster>,
    num_clients: usize,
    delta: usize,
) -> SplitResult<ParticipantAssignment> {
    let node_count: usize = clusters.iter().map(Cluster::size).sum();
    if num_clients == 0 {
        return Err(SplitError::InvalidBalanceParameters {
            node_count,
            num_clients,
            delta,
        });
    }

    let capacity = client_capacity(node_count, num_clients, delta);
    let mut clients: Vec<Vec<u32>> = vec![Vec::new(); num_clients];
    let mut overflow: Option<usize> = None;
    let mut pointer = 0;

    let ordered = clusters
        .into_iter()
        .sorted_by(|a, b| b.size().cmp(&a.size()).then_with(|| a.id.cmp(&b.id)));

    for cluster in ordered {
        let mut target = None;
        for _ in 0..num_clients {
            if clients[pointer].len() + cluster.size() <= capacity {
                target = Some(pointer);
                break;
            }
            pointer = (pointer + 1) % num_clients;
        }

        let target = match target {
            Some(client) => client,
            None => {
                let client = *overflow.get_or_insert_with(|| least_loaded(&clients));
                log::debug!(
                    "No client has room for cluster {} ({} nodes, capacity {}); client {} overflows",
                    cluster.id,
                    cluster.size(),
                    capacity,
                    client
                );
                client
            }
        };

        log::debug!("Cluster {} ({} nodes) -> client {}", cluster.id, cluster.size(), target);
        clients[target].extend(cluster.members);
        pointer = (target + 1) % num_clients;
    }

    let assignment = ParticipantAssignment {
        clients,
        capacity,
        overflow,
    };

    log::info!(
        "Assigned {} nodes to {} clients (capacity {}): sizes {:?}",
        node_count,
        num_clients,
        capacity,
        assignment.sizes()
    );
    if let Some(client) = assignment.overflow {
        log::warn!(
            "Client {} holds {} nodes, {} over capacity {}; lower the client count or raise delta",
            client,
            assignment.clients[client].len(),
            assignment.overflow_excess(),
            capacity
        );
    }

    Ok(assignment)
}

fn least_loaded(clients: &[Vec<u32>]) -> usize {
    clients
        .iter()
        .enumerate()
        .min_by_key(|(_, nodes)| nodes.len())
        .map_or(0, |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters(sizes: &[usize]) -> Vec<Cluster> {
        let mut next = 0u32;
        sizes
            .iter()
            .enumerate()
            .map(|(id, &size)| {
                let members = (next..next + size as u32).collect();
                next += size as u32;
                Cluster::new(id as u32, members)
            })
            .collect()
    }

    #[test]
    fn test_one_clique_per_client() {
        let assignment = assign(clusters(&[5, 5]), 2, 0).unwrap();

        assert_eq!(assignment.client(0), &[0, 1, 2, 3, 4]);
        assert_eq!(assignment.client(1), &[5, 6, 7, 8, 9]);
        assert_eq!(assignment.capacity(), 5);
        assert_eq!(assignment.overflow_client(), None);
    }

    #[test]
    fn test_singletons_round_robin() {
        let assignment = assign(clusters(&[1; 6]), 3, 1).unwrap();

        assert_eq!(assignment.sizes(), vec![2, 2, 2]);
        assert_eq!(assignment.client(0), &[0, 3]);
        assert_eq!(assignment.client(1), &[1, 4]);
        assert_eq!(assignment.client(2), &[2, 5]);
    }

    #[test]
    fn test_largest_first_with_skip_ahead() {
        // capacity = 12 / 2 + 1 = 7
        let assignment = assign(clusters(&[2, 4, 3, 3]), 2, 1).unwrap();

        // 4 -> c0, 3 (id 2) -> c1, 3 (id 3) -> c0 (7), 2 -> c1 (5)
        assert_eq!(assignment.sizes(), vec![7, 5]);
        assert_eq!(assignment.client(0), &[2, 3, 4, 5, 9, 10, 11]);
        assert_eq!(assignment.client(1), &[6, 7, 8, 0, 1]);
    }

    #[test]
    fn test_full_cycle_falls_back_to_one_overflow_client() {
        // capacity = 10 / 3 = 3; the trailing singleton fits nowhere
        let assignment = assign(clusters(&[3, 3, 3, 1]), 3, 0).unwrap();

        assert_eq!(assignment.overflow_client(), Some(0));
        assert_eq!(assignment.sizes(), vec![4, 3, 3]);
        assert_eq!(assignment.overflow_excess(), 1);
    }

    #[test]
    fn test_overflow_excess_accumulates_on_one_client() {
        // capacity = 14 / 3 = 4; three 4-clusters fill every client
        let assignment = assign(clusters(&[4, 4, 4, 1, 1]), 3, 0).unwrap();

        assert_eq!(assignment.num_clients(), 3);
        assert_eq!(assignment.overflow_client(), Some(0));
        assert_eq!(assignment.sizes(), vec![6, 4, 4]);
        assert_eq!(assignment.overflow_excess(), 2);
        assert_eq!(assignment.clients()[0], vec![0, 1, 2, 3, 12, 13]);
    }

    #[test]
    fn test_no_overflow_means_no_excess() {
        let assignment = assign(clusters(&[5, 5]), 2, 0).unwrap();
        assert_eq!(assignment.overflow_excess(), 0);
    }

    #[test]
    fn test_zero_clients_rejected() {
        assert!(matches!(
            assign(clusters(&[2]), 0, 0),
            Err(SplitError::InvalidBalanceParameters { num_clients: 0, .. })
        ));
    }

    #[test]
    fn test_owners_cover_every_node() {
        let assignment = assign(clusters(&[2, 2, 1]), 2, 1).unwrap();
        let owners = assignment.owners(5);

        assert!(owners.iter().all(|&owner| owner < 2));
    }
}
