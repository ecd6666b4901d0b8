//! Genome manipulation utilities for queen-bee evolution.
//!
//! Provides random generation, distinct-index sampling, mutation and crossover.
//! Every operation returns a fresh genome and leaves its inputs untouched.

use rand::prelude::*;
use rand::seq::index;

use crate::schema::Genome;

/// Which parent supplies the first half of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverOrder {
    /// Queen's first half, mate's second half.
    QueenFirst,
    /// Mate's first half, queen's second half.
    MateFirst,
}

/// Random number generator wrapper for genome operations.
///
/// All randomness in a run flows through one instance, so seeding it fixes
/// the whole run.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a genome with every gene uniform over [0, 255].
    pub fn random_genome(&mut self, gene_length: usize) -> Genome {
        Genome::new((0..gene_length).map(|_| self.rng.r#gen::<u8>()).collect())
    }

    /// Draw `amount` distinct indices from `0..length`, uniformly without replacement.
    ///
    /// Panics if `amount > length`.
    pub fn distinct_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount).into_vec()
    }

    /// Nudge exactly `count` distinct genes by +1 or -1, saturating at 0 and 255.
    ///
    /// The positions are drawn fresh for every call; `count` is capped at the
    /// genome length.
    pub fn mutate(&mut self, genome: &[u8], count: usize) -> Genome {
        let mut genes = genome.to_vec();
        let count = count.min(genes.len());
        for pos in self.distinct_indices(genes.len(), count) {
            genes[pos] = if self.rng.gen_bool(0.5) {
                genes[pos].saturating_add(1)
            } else {
                genes[pos].saturating_sub(1)
            };
        }
        Genome::new(genes)
    }

    /// Flip a fair coin for the parent order of one child.
    pub fn crossover_order(&mut self) -> CrossoverOrder {
        if self.rng.gen_bool(0.5) {
            CrossoverOrder::QueenFirst
        } else {
            CrossoverOrder::MateFirst
        }
    }

    /// Single-point crossover at the midpoint with a random parent order.
    pub fn crossover(&mut self, queen: &[u8], mate: &[u8]) -> Genome {
        let order = self.crossover_order();
        splice(queen, mate, order)
    }
}

/// Join the first half of one parent to the second half of the other.
///
/// The split point is `len / 2`, so for odd lengths the second parent
/// supplies the extra gene.
pub fn splice(queen: &[u8], mate: &[u8], order: CrossoverOrder) -> Genome {
    debug_assert_eq!(queen.len(), mate.len());
    let midpoint = queen.len() / 2;
    let (first, second) = match order {
        CrossoverOrder::QueenFirst => (queen, mate),
        CrossoverOrder::MateFirst => (mate, queen),
    };

    let mut genes = Vec::with_capacity(first.len());
    genes.extend_from_slice(&first[..midpoint]);
    genes.extend_from_slice(&second[midpoint..]);
    Genome::new(genes)
}

/// Number of positions at which two genomes differ.
#[cfg(test)]
pub(crate) fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}
