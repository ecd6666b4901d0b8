//! Queen management: crowning, supplanting and demotion.
//!
//! The queen lives outside the population. She is crowned from the top of
//! the sorted population and only loses her place to a strictly fitter
//! child, at which point she rejoins the population as an ordinary member.

use super::EvolutionError;
use super::fitness::Bee;

/// Outcome of a succession check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Succession {
    /// No queen existed; the best individual was crowned.
    Crowned,
    /// A child beat the queen; they swapped roles.
    Supplanted,
    /// The queen kept her place.
    Retained,
}

/// Holds the elite individual between generations.
#[derive(Debug, Clone, Default)]
pub struct Hive {
    queen: Option<Bee>,
}

impl Hive {
    /// Create an empty hive (no queen).
    pub fn new() -> Self {
        Self::default()
    }

    /// The current queen, if crowned.
    pub fn queen(&self) -> Option<&Bee> {
        self.queen.as_ref()
    }

    /// Decide who reigns this generation.
    ///
    /// `population` must be sorted by descending fitness. If its best member
    /// is strictly fitter than the queen, the queen is demoted back into the
    /// population (keeping the sort order) and the vacancy is filled by
    /// extracting the best member. With no queen the best member is crowned
    /// unconditionally.
    pub fn succession(&mut self, population: &mut Vec<Bee>) -> Result<Succession, EvolutionError> {
        let challenger = population
            .first()
            .map(|bee| bee.fitness)
            .ok_or(EvolutionError::EmptyPopulation)?;

        let outcome = match self.queen.take() {
            None => {
                log::debug!("queen crowned: {:.3}", challenger);
                Succession::Crowned
            }
            Some(queen) if challenger > queen.fitness => {
                log::debug!(
                    "queen supplanted: {:.3} -> {:.3}",
                    queen.fitness,
                    challenger
                );
                let pos = population.partition_point(|bee| bee.fitness >= queen.fitness);
                population.insert(pos, queen);
                Succession::Supplanted
            }
            Some(queen) => {
                self.queen = Some(queen);
                return Ok(Succession::Retained);
            }
        };

        self.queen = Some(population.remove(0));
        Ok(outcome)
    }
}
