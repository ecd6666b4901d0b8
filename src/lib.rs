//! Queen-bee and mutant-bee evolution - an elitist genetic algorithm.
//!
//! This crate evolves a fixed-length byte sequence toward a target sequence
//! (typically the code points of a short text). One privileged individual,
//! the queen, mates with every member of the next generation; her mates are
//! chosen by tournament and strongly mutated first, so her genes dominate
//! while the search still explores around her.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, genome, fitness and snapshot types
//! - `compute`: The search itself (fitness, succession, selection, mutation, crossover)
//!
//! # Example
//!
//! ```rust,no_run
//! use queen_bee::{EvolutionEngine, QueenBeeConfig};
//!
//! // Create configuration
//! let config = QueenBeeConfig {
//!     random_seed: Some(42),
//!     ..QueenBeeConfig::with_target("Attention is all you need")
//! };
//!
//! // Run until the target is matched
//! let mut engine = EvolutionEngine::new(config).unwrap();
//! let result = engine.run().unwrap();
//!
//! println!("Solved in {} generations", result.stats.generations);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, EvolutionError};
pub use schema::{Fitness, GenerationSnapshot, Genome, QueenBeeConfig, RunResult};
