//! Compute module - The queen-bee search algorithm.

pub mod evolution;

pub use evolution::{EvolutionEngine, EvolutionError, GenomeRng};
