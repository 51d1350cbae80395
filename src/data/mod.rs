//! Graph loading and generation module

pub mod json;
pub mod synthetic;
