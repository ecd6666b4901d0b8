//! Deterministic tournament selection of mates for the queen.

use crate::schema::Genome;

use super::fitness::Bee;
use super::genome::GenomeRng;
use super::search::EvolutionError;

/// Index of the tournament winner among `participants`.
///
/// The winner has the highest fitness; ties go to the first participant
/// drawn. Returns `None` only for an empty tournament.
pub fn tournament_winner(pool: &[Bee], participants: &[usize]) -> Option<usize> {
    participants.iter().copied().reduce(|best, idx| {
        if pool[idx].fitness > pool[best].fitness {
            idx
        } else {
            best
        }
    })
}

/// Run one independent tournament per slot and return the winners' genomes.
///
/// Each tournament draws `tournament_size` distinct members of `pool`.
/// Participants may recur across tournaments, so the same genome can win
/// several slots. Fails only when a tournament has no participants.
pub fn select_mates(
    rng: &mut GenomeRng,
    pool: &[Bee],
    tournament_size: usize,
    slots: usize,
) -> Result<Vec<Genome>, EvolutionError> {
    let size = tournament_size.min(pool.len());
    (0..slots)
        .map(|_| {
            let participants = rng.distinct_indices(pool.len(), size);
            tournament_winner(pool, &participants)
                .map(|idx| pool[idx].genome.clone())
                .ok_or(EvolutionError::EmptyTournament)
        })
        .collect()
}
