//! Configuration types for queen-bee evolution runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compute::evolution::{CodecError, encode};

/// Top-level configuration for a queen-bee run.
///
/// All values are fixed when the engine is created and never change mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueenBeeConfig {
    /// Goal sequence. Its length defines the gene length of every genome.
    #[serde(default = "default_target")]
    pub target: String,
    /// Number of individuals, including the queen.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Fraction of positions mutated in every child after crossover.
    #[serde(default = "default_mutation_prob")]
    pub mutation_prob: f64,
    /// Fraction of positions mutated in every mate before crossover.
    #[serde(default = "default_strong_mutation_prob")]
    pub strong_mutation_prob: f64,
    /// Participants drawn per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for QueenBeeConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            population_size: default_population_size(),
            mutation_prob: default_mutation_prob(),
            strong_mutation_prob: default_strong_mutation_prob(),
            tournament_size: default_tournament_size(),
            random_seed: None,
        }
    }
}

fn default_target() -> String {
    "Attention is all you need".to_string()
}
fn default_population_size() -> usize {
    100
}
fn default_mutation_prob() -> f64 {
    0.04
}
fn default_strong_mutation_prob() -> f64 {
    0.25
}
fn default_tournament_size() -> usize {
    25
}

impl QueenBeeConfig {
    /// Create a configuration for `target` with default hyperparameters.
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Number of genes in every genome.
    #[inline]
    pub fn gene_length(&self) -> usize {
        self.target.chars().count()
    }

    /// Positions touched by the weak, population-wide mutation.
    #[inline]
    pub fn mutation_count(&self) -> usize {
        position_count(self.mutation_prob, self.gene_length())
    }

    /// Positions touched by the strong mutation applied to mates.
    #[inline]
    pub fn strong_mutation_count(&self) -> usize {
        position_count(self.strong_mutation_prob, self.gene_length())
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        encode(&self.target)?;

        if self.tournament_size < 1 {
            return Err(ConfigError::TournamentTooSmall);
        }
        if self.population_size <= self.tournament_size {
            return Err(ConfigError::PopulationTooSmall {
                population: self.population_size,
                tournament: self.tournament_size,
            });
        }

        check_probability("mutation_prob", self.mutation_prob)?;
        check_probability("strong_mutation_prob", self.strong_mutation_prob)?;

        Ok(())
    }
}

fn position_count(prob: f64, gene_length: usize) -> usize {
    ((prob * gene_length as f64).round() as usize).min(gene_length)
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

/// Configuration errors. All are fatal and detected before a run starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Target sequence must not be empty")]
    EmptyTarget,
    #[error("Tournament size must be at least 1")]
    TournamentTooSmall,
    #[error("Population size ({population}) must exceed tournament size ({tournament})")]
    PopulationTooSmall { population: usize, tournament: usize },
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Target is not encodable: {0}")]
    Codec(#[from] CodecError),
    #[error("Error reading config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error parsing config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_valid() {
        let config = QueenBeeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gene_length(), 25);
    }

    #[test]
    fn test_derived_counts() {
        let config = QueenBeeConfig::default();
        // 0.04 * 25 = 1.0, 0.25 * 25 = 6.25
        assert_eq!(config.mutation_count(), 1);
        assert_eq!(config.strong_mutation_count(), 6);

        let short = QueenBeeConfig {
            population_size: 4,
            tournament_size: 3,
            ..QueenBeeConfig::with_target("AB")
        };
        assert_eq!(short.mutation_count(), 0);
        assert_eq!(short.strong_mutation_count(), 1);
    }

    #[test]
    fn test_counts_capped_at_gene_length() {
        let config = QueenBeeConfig {
            mutation_prob: 1.0,
            strong_mutation_prob: 1.0,
            ..QueenBeeConfig::with_target("abc")
        };
        assert_eq!(config.mutation_count(), 3);
        assert_eq!(config.strong_mutation_count(), 3);
    }

    #[test]
    fn test_empty_target_rejected() {
        let config = QueenBeeConfig::with_target("");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTarget)));
    }

    #[test]
    fn test_population_must_exceed_tournament() {
        let config = QueenBeeConfig {
            population_size: 25,
            tournament_size: 25,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PopulationTooSmall {
                population: 25,
                tournament: 25
            })
        ));

        let config = QueenBeeConfig {
            population_size: 26,
            tournament_size: 25,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_tournament_rejected() {
        let config = QueenBeeConfig {
            tournament_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TournamentTooSmall)
        ));
    }

    #[test]
    fn test_probability_bounds() {
        let config = QueenBeeConfig {
            mutation_prob: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "mutation_prob",
                ..
            })
        ));

        let config = QueenBeeConfig {
            strong_mutation_prob: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "strong_mutation_prob",
                ..
            })
        ));

        let config = QueenBeeConfig {
            mutation_prob: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unencodable_target_rejected() {
        let config = QueenBeeConfig::with_target("bee \u{1F41D}");
        assert!(matches!(config.validate(), Err(ConfigError::Codec(_))));
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let config = QueenBeeConfig::from_json_str(r#"{ "target": "hello" }"#).unwrap();
        assert_eq!(config.target, "hello");
        assert_eq!(config.population_size, 100);
        assert_eq!(config.tournament_size, 25);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "target": "AB", "population_size": 4, "tournament_size": 3, "random_seed": 7 }}"#
        )
        .unwrap();

        let config = QueenBeeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.target, "AB");
        assert_eq!(config.population_size, 4);
        assert_eq!(config.random_seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = QueenBeeConfig::from_file(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_serialization() {
        let config = QueenBeeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = QueenBeeConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
