//! Fitness evaluation against a fixed target genome.

use crate::schema::{BeeSnapshot, Fitness, Genome};

use super::codec::decode;

/// An individual together with its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Bee {
    /// The genome.
    pub genome: Genome,
    /// Fitness of `genome` against the run's target.
    pub fitness: Fitness,
}

impl Bee {
    /// Convert to snapshot for display and serialization.
    pub fn to_snapshot(&self) -> BeeSnapshot {
        BeeSnapshot {
            genes: self.genome.clone(),
            text: decode(&self.genome),
            fitness: self.fitness,
        }
    }
}

/// Scores genomes by inverse squared distance to the target.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    target: Genome,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(target: Genome) -> Self {
        Self { target }
    }

    /// The target genome.
    pub fn target(&self) -> &Genome {
        &self.target
    }

    /// Fitness of a single genome.
    pub fn fitness(&self, genome: &[u8]) -> Fitness {
        debug_assert_eq!(genome.len(), self.target.len());
        let squared_error: u64 = genome
            .iter()
            .zip(self.target.iter())
            .map(|(&g, &t)| {
                let diff = u64::from(g.abs_diff(t));
                diff * diff
            })
            .sum();
        Fitness::from_squared_error(squared_error)
    }

    /// Score every genome and return the population sorted by descending fitness.
    pub fn evaluate(&self, genomes: Vec<Genome>) -> Vec<Bee> {
        let mut population: Vec<Bee> = genomes
            .into_iter()
            .map(|genome| Bee {
                fitness: self.fitness(&genome),
                genome,
            })
            .collect();
        sort_descending(&mut population);
        population
    }
}

/// Sort a population by descending fitness.
pub fn sort_descending(population: &mut [Bee]) {
    population.sort_by(|a, b| b.fitness.cmp(&a.fitness));
}
