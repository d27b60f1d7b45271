//! GA hyperparameters.
//!
//! [`GaConfig`] is built either in code through `with_*` methods or from a
//! JSON document. Both paths end in [`GaConfig::validate`]; nothing is
//! clamped into range.
//!
//! ```
//! use van_load::ga::GaConfig;
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_generations(50)
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::operators::{CrossoverType, GeneticOperators, MutationType};
use super::problem::PenaltyPolicy;
use super::selection::SelectionType;
use crate::validation::{validate_config, ConfigError};

/// Fitness-plateau stopping rule.
///
/// The run stops once the best fitness has failed to improve by more than
/// `tolerance` for `patience` consecutive generations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyStopping {
    /// Minimum improvement that counts as progress.
    pub tolerance: f64,
    /// Consecutive non-improving generations before stopping.
    pub patience: usize,
}

/// GA configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Maximum number of generations.
    pub generations: usize,
    /// Probability a selected pair is recombined.
    pub crossover_probability: f64,
    /// Per-gene mutation probability.
    pub mutation_probability: f64,
    /// Top individuals copied unchanged into the next generation.
    pub elitism_count: usize,
    /// Penalty per unit of excess volume.
    pub penalty_factor: f64,
    /// Over-capacity scoring rule.
    pub penalty_policy: PenaltyPolicy,
    /// RNG seed; `None` draws a fresh seed from the OS (non-reproducible).
    pub seed: Option<u64>,
    /// Optional plateau stopping rule (disabled by default).
    pub early_stopping: Option<EarlyStopping>,
    /// Parent selection strategy.
    pub selection: SelectionType,
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation strategy.
    pub mutation_type: MutationType,
    /// Evaluate fitness on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            crossover_probability: 0.9,
            mutation_probability: 0.05,
            elitism_count: 1,
            penalty_factor: 1000.0,
            penalty_policy: PenaltyPolicy::Linear,
            seed: None,
            early_stopping: None,
            selection: SelectionType::Roulette,
            crossover_type: CrossoverType::SinglePoint,
            mutation_type: MutationType::RandomReset,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every hyperparameter range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)
    }

    /// Operators configured by this config.
    pub fn operators(&self) -> GeneticOperators {
        GeneticOperators {
            crossover_type: self.crossover_type,
            mutation_type: self.mutation_type,
            crossover_probability: self.crossover_probability,
            mutation_probability: self.mutation_probability,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, probability: f64) -> Self {
        self.crossover_probability = probability;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    /// Sets the elite count.
    pub fn with_elitism_count(mut self, count: usize) -> Self {
        self.elitism_count = count;
        self
    }

    /// Sets the penalty factor.
    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    /// Sets the penalty policy.
    pub fn with_penalty_policy(mut self, policy: PenaltyPolicy) -> Self {
        self.penalty_policy = policy;
        self
    }

    /// Fixes the RNG seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clears the seed: each run draws fresh OS entropy.
    pub fn unseeded(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Enables plateau stopping.
    pub fn with_early_stopping(mut self, tolerance: f64, patience: usize) -> Self {
        self.early_stopping = Some(EarlyStopping {
            tolerance,
            patience,
        });
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: SelectionType) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover_type(mut self, crossover_type: CrossoverType) -> Self {
        self.crossover_type = crossover_type;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation_type(mut self, mutation_type: MutationType) -> Self {
        self.mutation_type = mutation_type;
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.elitism_count, 1);
        assert!(config.seed.is_none());
        assert!(config.early_stopping.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(50)
            .with_seed(42)
            .with_early_stopping(0.5, 10)
            .with_selection(SelectionType::Tournament { size: 3 })
            .with_crossover_type(CrossoverType::Uniform)
            .with_mutation_type(MutationType::Creep);

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.unseeded().seed, None);

        let config = GaConfig::default().with_mutation_probability(0.2);
        let ops = config.operators();
        assert_eq!(ops.mutation_probability, 0.2);
        assert_eq!(ops.crossover_probability, 0.9);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GaConfig::from_json_str(
            r#"{
                "population_size": 20,
                "generations": 50,
                "seed": 42,
                "crossover_type": "two_points",
                "selection": {"type": "tournament", "size": 4},
                "early_stopping": {"tolerance": 0.01, "patience": 5}
            }"#,
        )
        .unwrap();

        assert_eq!(config.population_size, 20);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.crossover_type, CrossoverType::TwoPoint);
        assert_eq!(config.selection, SelectionType::Tournament { size: 4 });
        assert_eq!(config.early_stopping.map(|e| e.patience), Some(5));
        assert_eq!(config.mutation_probability, 0.05);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert_eq!(
            GaConfig::from_json_str(r#"{"population_size": 0}"#),
            Err(ConfigError::InvalidPopulationSize)
        );
        assert!(matches!(
            GaConfig::from_json_str(r#"{"generations": -1}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GaConfig::from_json_str(r#"{"crossover_probability": 1.5}"#),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));
        assert!(matches!(
            GaConfig::from_json_str(r#"{"num_parents_mating": 4}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trip_default() {
        let json = serde_json::to_string(&GaConfig::default()).unwrap();
        assert_eq!(GaConfig::from_json_str(&json).unwrap(), GaConfig::default());
    }
}
