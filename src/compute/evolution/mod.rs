//! Queen-bee and mutant-bee evolution.
//!
//! A genetic algorithm in which one elite individual, the queen, mates with
//! every member of the next generation. Mates are picked by tournament and
//! strongly mutated before crossover, which keeps the queen's genes dominant
//! while still exploring around her.
//!
//! # Overview
//!
//! One generation runs these phases in order:
//!
//! 1. **Fitness** (`fitness`): score every genome against the target, sort descending
//! 2. **Succession** (`queen`): crown a queen, or swap her with a strictly fitter child
//! 3. **Selection** (`selection`): one tournament per non-queen slot
//! 4. **Strong mutation** (`genome`): nudge a fixed number of genes in every mate
//! 5. **Crossover** (`genome`): splice each mutant with the queen at the midpoint,
//!    with a coin flip deciding which parent supplies the first half
//! 6. **Weak mutation** (`genome`): nudge a smaller number of genes in every child
//!
//! The run ends as soon as an evaluated individual matches the target exactly.
//!
//! # Example
//!
//! ```rust,no_run
//! use queen_bee::schema::QueenBeeConfig;
//! use queen_bee::compute::evolution::EvolutionEngine;
//!
//! let config = QueenBeeConfig::with_target("Attention is all you need");
//! let mut engine = EvolutionEngine::new(config).unwrap();
//!
//! for snapshot in engine.by_ref().take(1000) {
//!     let snapshot = snapshot.unwrap();
//!     if let Some(best) = snapshot.best() {
//!         println!("Generation {}: {} ({:.3})", snapshot.generation, best.text, best.fitness);
//!     }
//! }
//! ```

mod codec;
mod fitness;
mod genome;
mod queen;
mod report;
mod search;
mod selection;

pub use codec::{CodecError, decode, encode};
pub use fitness::{Bee, FitnessEvaluator, sort_descending};
pub use genome::{CrossoverOrder, GenomeRng, splice};
pub use queen::{Hive, Succession};
pub use report::{ConsoleReporter, Reporter, SilentReporter, format_bee};
pub use search::{EvolutionEngine, EvolutionError};
pub use selection::{select_mates, tournament_winner};
