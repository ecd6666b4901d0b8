//! Generation driver for queen-bee evolution.

use std::time::Instant;

use crate::schema::{
    ConfigError, EvolutionHistory, Fitness, GenerationSnapshot, Genome, QueenBeeConfig, RunResult,
    RunStats, StopReason,
};

use super::codec::encode;
use super::fitness::{Bee, FitnessEvaluator};
use super::genome::GenomeRng;
use super::queen::Hive;
use super::selection::select_mates;

/// Errors raised while driving a run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Population is empty; no queen can be crowned")]
    EmptyPopulation,
    #[error("Hive has no queen after succession")]
    NoQueen,
    #[error("Tournament drew no participants")]
    EmptyTournament,
    #[error("Run was aborted by an earlier error")]
    Aborted,
}

/// Evolution engine that runs the search.
///
/// Each call to [`step`](Self::step) evaluates one generation and breeds the
/// next. The engine is also an iterator over generation snapshots, so callers
/// choose how many generations to pull.
pub struct EvolutionEngine {
    config: QueenBeeConfig,
    seed: u64,
    rng: GenomeRng,
    evaluator: FitnessEvaluator,
    mutation_count: usize,
    strong_mutation_count: usize,
    /// Genomes awaiting evaluation in the current generation.
    brood: Vec<Genome>,
    /// Non-queen population from the last evaluation, sorted by fitness.
    population: Vec<Bee>,
    hive: Hive,
    history: EvolutionHistory,
    generation: usize,
    evaluations: u64,
    solved: bool,
    finished: bool,
}

impl EvolutionEngine {
    /// Create a new evolution engine with a uniformly random population.
    pub fn new(config: QueenBeeConfig) -> Result<Self, EvolutionError> {
        config.validate()?;
        let target = encode(&config.target).map_err(ConfigError::from)?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = GenomeRng::new(seed);
        log::debug!("random seed: {seed}");

        let brood = (0..config.population_size)
            .map(|_| rng.random_genome(target.len()))
            .collect();

        Ok(Self {
            mutation_count: config.mutation_count(),
            strong_mutation_count: config.strong_mutation_count(),
            config,
            seed,
            rng,
            evaluator: FitnessEvaluator::new(target),
            brood,
            population: Vec::new(),
            hive: Hive::new(),
            history: EvolutionHistory::default(),
            generation: 1,
            evaluations: 0,
            solved: false,
            finished: false,
        })
    }

    /// The run configuration.
    pub fn config(&self) -> &QueenBeeConfig {
        &self.config
    }

    /// Seed of the run's random source.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Encoded target genome.
    pub fn target(&self) -> &Genome {
        self.evaluator.target()
    }

    /// Number of the generation currently being evaluated or bred.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The reigning queen, if any.
    pub fn queen(&self) -> Option<&Bee> {
        self.hive.queen()
    }

    /// Population from the last evaluated generation, queen excluded once crowned.
    pub fn population(&self) -> &[Bee] {
        &self.population
    }

    /// Whether an exact match has been found.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Best individual seen in the last evaluated generation, queen included.
    pub fn best(&self) -> Option<&Bee> {
        self.population
            .iter()
            .chain(self.hive.queen())
            .max_by_key(|bee| bee.fitness)
    }

    /// Run a single generation.
    ///
    /// Returns the snapshot taken right after fitness evaluation, or `None`
    /// once the run has finished.
    pub fn step(&mut self) -> Result<Option<GenerationSnapshot>, EvolutionError> {
        if self.finished {
            return Ok(None);
        }

        match self.step_generation() {
            Ok(snapshot) => {
                self.finished = snapshot.solved;
                Ok(Some(snapshot))
            }
            Err(err) => {
                self.finished = true;
                Err(err)
            }
        }
    }

    fn step_generation(&mut self) -> Result<GenerationSnapshot, EvolutionError> {
        let brood = std::mem::take(&mut self.brood);
        self.evaluations += brood.len() as u64;
        let mut population = self.evaluator.evaluate(brood);
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let queen_fitness = self.hive.queen().map(|q| q.fitness);
        let solved = population[0].fitness.is_perfect()
            || queen_fitness.is_some_and(Fitness::is_perfect);
        self.record_history(&population, queen_fitness);

        let snapshot = GenerationSnapshot {
            generation: self.generation,
            queen: self.hive.queen().map(Bee::to_snapshot),
            population: population.iter().map(Bee::to_snapshot).collect(),
            solved,
        };

        if solved {
            self.solved = true;
            self.population = population;
            log::info!(
                "solved at generation {}: {:?}",
                self.generation,
                snapshot.best().map(|b| b.text.as_str()).unwrap_or_default()
            );
            return Ok(snapshot);
        }

        self.hive.succession(&mut population)?;
        let queen = self
            .hive
            .queen()
            .map(|q| q.genome.clone())
            .ok_or(EvolutionError::NoQueen)?;

        // Tournament selection - one mate per non-queen slot
        let slots = population.len();
        let mates = select_mates(&mut self.rng, &population, self.config.tournament_size, slots)?;

        // Mates are strongly mutated before mating ("mutant bees")
        let mutants: Vec<Genome> = mates
            .iter()
            .map(|mate| self.rng.mutate(mate, self.strong_mutation_count))
            .collect();

        // Cross every mutant with the queen
        let children: Vec<Genome> = mutants
            .iter()
            .map(|mutant| self.rng.crossover(&queen, mutant))
            .collect();

        // Weak mutation of the whole next generation
        self.brood = children
            .iter()
            .map(|child| self.rng.mutate(child, self.mutation_count))
            .collect();

        self.population = population;
        self.generation += 1;

        Ok(snapshot)
    }

    fn record_history(&mut self, population: &[Bee], queen_fitness: Option<Fitness>) {
        let best = queen_fitness.map_or(population[0].fitness, |q| q.max(population[0].fitness));

        let finite: Vec<f64> = population
            .iter()
            .map(|bee| bee.fitness)
            .filter(|f| !f.is_perfect())
            .map(Fitness::value)
            .collect();
        let avg = if finite.is_empty() {
            0.0
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        };

        log::trace!(
            "generation {}: best {:.3}, avg {:.6}",
            self.generation,
            best,
            avg
        );
        self.history.best_fitness.push(best);
        self.history.avg_fitness.push(avg);
    }

    /// Run until solved or until `max_generations` generations have been evaluated.
    ///
    /// `callback` sees every generation snapshot as it is produced.
    pub fn run_with_callback<F>(
        &mut self,
        max_generations: Option<usize>,
        mut callback: F,
    ) -> Result<RunResult, EvolutionError>
    where
        F: FnMut(&GenerationSnapshot),
    {
        let start_time = Instant::now();

        let stop_reason = loop {
            if self.solved {
                break StopReason::Solved;
            }
            if max_generations.is_some_and(|limit| self.generations_evaluated() >= limit) {
                log::info!("stopping after {} generations", self.generations_evaluated());
                break StopReason::MaxGenerations;
            }

            match self.step()? {
                Some(snapshot) => callback(&snapshot),
                None => return Err(EvolutionError::Aborted),
            }
        };

        Ok(RunResult {
            target: self.config.target.clone(),
            best: self.best().map(Bee::to_snapshot),
            stats: RunStats {
                generations: self.generations_evaluated(),
                total_evaluations: self.evaluations,
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
                seed: self.seed,
                stop_reason,
            },
            history: self.history.clone(),
        })
    }

    /// Run until solved (blocking, unbounded).
    pub fn run(&mut self) -> Result<RunResult, EvolutionError> {
        self.run_with_callback(None, |_| {})
    }

    /// Generations whose fitness has been evaluated.
    pub fn generations_evaluated(&self) -> usize {
        self.history.best_fitness.len()
    }
}

impl Iterator for EvolutionEngine {
    type Item = Result<GenerationSnapshot, EvolutionError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::genome::hamming_distance;

    fn small_config(target: &str, seed: u64) -> QueenBeeConfig {
        QueenBeeConfig {
            target: target.to_string(),
            population_size: 10,
            mutation_prob: 0.1,
            strong_mutation_prob: 0.3,
            tournament_size: 3,
            random_seed: Some(seed),
        }
    }

    #[test]
    fn test_evolution_engine_creation() {
        let engine = EvolutionEngine::new(small_config("hello", 1)).unwrap();
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.brood.len(), 10);
        assert!(engine.queen().is_none());
        assert!(engine.population().is_empty());
        assert_eq!(engine.target().genes(), b"hello");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = QueenBeeConfig {
            population_size: 3,
            tournament_size: 3,
            ..small_config("hello", 1)
        };
        assert!(matches!(
            EvolutionEngine::new(config),
            Err(EvolutionError::Config(ConfigError::PopulationTooSmall { .. }))
        ));
    }

    #[test]
    fn test_first_generation_crowns_queen() {
        let mut engine = EvolutionEngine::new(small_config("hello", 2)).unwrap();
        let snapshot = engine.step().unwrap().unwrap();

        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.queen.is_none());
        assert_eq!(snapshot.population.len(), 10);
        assert!(!snapshot.solved);

        assert_eq!(engine.generation(), 2);
        assert_eq!(engine.population().len(), 9);
        assert_eq!(engine.brood.len(), 9);
        let queen = engine.queen().unwrap();
        assert_eq!(queen.genome, snapshot.population[0].genes);
    }

    #[test]
    fn test_population_size_stable_across_generations() {
        let mut engine = EvolutionEngine::new(small_config("queen", 3)).unwrap();
        for snapshot in engine.by_ref().take(50) {
            let snapshot = snapshot.unwrap();
            if snapshot.generation > 1 {
                assert!(snapshot.queen.is_some());
                assert_eq!(snapshot.population.len(), 9);
            }
            for bee in &snapshot.population {
                assert_eq!(bee.genes.len(), 5);
            }
            for pair in snapshot.population.windows(2) {
                assert!(pair[0].fitness >= pair[1].fitness);
            }
            if snapshot.solved {
                break;
            }
        }
    }

    #[test]
    fn test_queen_never_gets_worse() {
        let mut engine = EvolutionEngine::new(small_config("monotone", 4)).unwrap();
        let mut previous: Option<Fitness> = None;
        for _ in 0..200 {
            if engine.step().unwrap().is_none_or(|s| s.solved) {
                break;
            }
            let current = engine.queen().unwrap().fitness;
            if let Some(prev) = previous {
                assert!(current >= prev);
            }
            previous = Some(current);
        }
    }

    #[test]
    fn test_weak_mutation_reaches_next_brood() {
        // Without strong mutation, every child of a uniform hive is a copy of
        // the queen until weak mutation nudges all of its genes.
        let config = QueenBeeConfig {
            mutation_prob: 1.0,
            strong_mutation_prob: 0.0,
            ..small_config("hello", 8)
        };
        let mut engine = EvolutionEngine::new(config).unwrap();
        engine.brood = vec![Genome::from(&b"mmmmm"[..]); 10];

        let snapshot = engine.step().unwrap().unwrap();
        assert!(!snapshot.solved);

        let queen = engine.queen().unwrap().genome.clone();
        assert_eq!(queen.genes(), b"mmmmm");
        assert_eq!(engine.brood.len(), 9);
        for child in &engine.brood {
            assert_eq!(hamming_distance(child, &queen), 5);
            assert!(child.iter().all(|&g| g == b'l' || g == b'n'));
        }
    }

    #[test]
    fn test_generation_cap() {
        let config = QueenBeeConfig {
            target: "a much longer target that will not be solved quickly".to_string(),
            ..small_config("", 5)
        };
        let mut engine = EvolutionEngine::new(config).unwrap();
        let mut seen = Vec::new();
        let result = engine
            .run_with_callback(Some(5), |s| seen.push(s.generation))
            .unwrap();

        assert_eq!(result.stats.stop_reason, StopReason::MaxGenerations);
        assert_eq!(result.stats.generations, 5);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.history.best_fitness.len(), 5);
        assert_eq!(result.stats.total_evaluations, 10 + 4 * 9);
        assert!(result.best.is_some());
        assert!(result.winner().is_none());
    }

    #[test]
    fn test_zero_cap_evaluates_nothing() {
        let mut engine = EvolutionEngine::new(small_config("abc", 6)).unwrap();
        let result = engine.run_with_callback(Some(0), |_| {}).unwrap();
        assert_eq!(result.stats.generations, 0);
        assert!(result.best.is_none());
    }

    #[test]
    fn test_run_solves_short_target() {
        let mut engine = EvolutionEngine::new(small_config("hi", 7)).unwrap();
        let result = engine.run_with_callback(Some(100_000), |_| {}).unwrap();

        assert_eq!(result.stats.stop_reason, StopReason::Solved);
        let best = result.winner().unwrap();
        assert_eq!(best.text, "hi");
        assert!(best.fitness.is_perfect());
        assert!(engine.is_solved());
        assert!(engine.step().unwrap().is_none());
        assert!(engine.next().is_none());
    }
}
