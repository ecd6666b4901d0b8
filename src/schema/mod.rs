//! Schema module - Configuration, genome and progress types for queen-bee runs.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
