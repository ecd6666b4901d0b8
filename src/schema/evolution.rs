//! Genome, fitness and progress types for queen-bee evolution.
//!
//! These are plain data types shared between the search engine, the
//! reporting layer and the CLI. Everything here is serializable so a run can
//! be inspected or exported as JSON.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

// ============================================================================
// Genome
// ============================================================================

/// Fixed-length sequence of byte-valued genes.
///
/// Genomes are immutable values: mutation and crossover always build a new
/// genome. Gene values live in `u8`, so they can never leave [0, 255].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome(Vec<u8>);

impl Genome {
    /// Wrap a gene vector.
    pub fn new(genes: Vec<u8>) -> Self {
        Self(genes)
    }

    /// Gene values.
    #[inline]
    pub fn genes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Genome {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Genome {
    fn from(genes: Vec<u8>) -> Self {
        Self(genes)
    }
}

impl From<&[u8]> for Genome {
    fn from(genes: &[u8]) -> Self {
        Self(genes.to_vec())
    }
}

// ============================================================================
// Fitness
// ============================================================================

/// Inverse squared error against the target. Higher is better.
///
/// An exact match has zero error and maps to the infinite sentinel
/// [`Fitness::PERFECT`]. Fitness is totally ordered so populations can be
/// sorted without fallible comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitness(f64);

impl Fitness {
    /// Sentinel for a genome identical to the target.
    pub const PERFECT: Fitness = Fitness(f64::INFINITY);

    /// Fitness for a given sum of squared per-gene differences.
    pub fn from_squared_error(squared_error: u64) -> Self {
        if squared_error == 0 {
            Self::PERFECT
        } else {
            Self(1.0 / squared_error as f64)
        }
    }

    /// Raw value (`f64::INFINITY` for a perfect match).
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this is the exact-match sentinel.
    #[inline]
    pub fn is_perfect(self) -> bool {
        self.0.is_infinite()
    }
}

impl Eq for Fitness {}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fitness {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// JSON has no infinity, so the sentinel is written as the string "inf".
impl Serialize for Fitness {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.is_perfect() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FitnessRepr {
    Number(f64),
    String(String),
}

impl<'de> Deserialize<'de> for Fitness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match FitnessRepr::deserialize(deserializer)? {
            FitnessRepr::Number(value) if value >= 0.0 => Ok(Fitness(value)),
            FitnessRepr::Number(value) => Err(serde::de::Error::custom(format!(
                "Fitness must be non-negative, got {value}"
            ))),
            FitnessRepr::String(value) => match value.as_str() {
                "inf" => Ok(Fitness::PERFECT),
                other => Err(serde::de::Error::custom(format!(
                    "Unknown fitness string: {other}"
                ))),
            },
        }
    }
}

// ============================================================================
// Progress and Result Types
// ============================================================================

/// Snapshot of one individual for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeSnapshot {
    /// Gene values.
    pub genes: Genome,
    /// Genes decoded to text.
    pub text: String,
    /// Fitness against the target.
    pub fitness: Fitness,
}

/// State of a generation right after fitness evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    /// Generation number, starting at 1.
    pub generation: usize,
    /// Queen going into this generation, if one has been crowned.
    pub queen: Option<BeeSnapshot>,
    /// Population sorted by descending fitness.
    pub population: Vec<BeeSnapshot>,
    /// Whether an individual matched the target exactly.
    pub solved: bool,
}

impl GenerationSnapshot {
    /// Best individual in the snapshot, queen included.
    pub fn best(&self) -> Option<&BeeSnapshot> {
        self.population
            .iter()
            .chain(self.queen.iter())
            .max_by_key(|bee| bee.fitness)
    }
}

/// Per-generation statistics for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EvolutionHistory {
    /// Best fitness per generation, queen included.
    pub best_fitness: Vec<Fitness>,
    /// Mean finite fitness of the evaluated population per generation.
    pub avg_fitness: Vec<f64>,
}

/// Reason a run stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// An individual matched the target exactly.
    Solved,
    /// The caller's generation cap was reached first.
    MaxGenerations,
}

/// Statistics from a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Generations evaluated.
    pub generations: usize,
    /// Fitness evaluations performed.
    pub total_evaluations: u64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Seed of the run's random source.
    pub seed: u64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Final result of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Target text.
    pub target: String,
    /// Best individual of the last evaluated generation, queen included.
    /// `None` if no generation was evaluated.
    pub best: Option<BeeSnapshot>,
    /// Statistics from the run.
    pub stats: RunStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

impl RunResult {
    /// The exact match, if the run was solved.
    pub fn winner(&self) -> Option<&BeeSnapshot> {
        self.best
            .as_ref()
            .filter(|_| self.stats.stop_reason == StopReason::Solved)
    }
}
