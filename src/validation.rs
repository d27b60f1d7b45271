//! Input validation for van loading problems.
//!
//! Every check runs before the first generation. Invalid input is rejected
//! with a [`ConfigError`]; no value is ever clamped into range.
//!
//! Detects:
//! - Empty catalogs and duplicate product names
//! - Non-positive or non-finite unit values and volumes
//! - Non-positive or non-finite capacities
//! - Out-of-range GA hyperparameters

use std::collections::HashSet;

use crate::ga::{EarlyStopping, GaConfig, SelectionType};
use crate::models::Product;

/// Configuration error raised at construction time.
///
/// This is the only failure the solver exposes: once an engine has been
/// built from validated input, a run cannot fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The catalog has no products.
    #[error("EmptyCatalog: the product catalog must contain at least one product")]
    EmptyCatalog,
    /// Two products share the same name.
    #[error("DuplicateProduct: product name '{name}' appears more than once")]
    DuplicateProduct { name: String },
    /// A product has a non-positive or non-finite value or volume.
    #[error("InvalidProduct: product '{name}' {reason}")]
    InvalidProduct { name: String, reason: String },
    /// The van capacity is not a positive finite number.
    #[error("InvalidCapacity: van capacity must be positive and finite, got {0}")]
    InvalidCapacity(f64),
    /// Population size is zero.
    #[error("InvalidPopulationSize: population size must be greater than 0")]
    InvalidPopulationSize,
    /// Generation count is zero.
    #[error("InvalidGenerations: generation count must be greater than 0")]
    InvalidGenerations,
    /// A probability lies outside `[0, 1]`.
    #[error("ProbabilityOutOfRange: {name} must be between 0.0 and 1.0, got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    /// Elite count exceeds the population size.
    #[error("InvalidElitism: elitism count {elitism} exceeds population size {population_size}")]
    InvalidElitism {
        elitism: usize,
        population_size: usize,
    },
    /// Penalty factor is not a positive finite number.
    #[error("InvalidPenaltyFactor: penalty factor must be positive and finite, got {0}")]
    InvalidPenaltyFactor(f64),
    /// Tournament size is zero.
    #[error("InvalidTournamentSize: tournament size must be greater than 0")]
    InvalidTournamentSize,
    /// Early stopping tolerance or patience is out of range.
    #[error("InvalidEarlyStopping: {0}")]
    InvalidEarlyStopping(String),
    /// The configuration document could not be parsed.
    #[error("Parse: {0}")]
    Parse(String),
}

impl ConfigError {
    fn invalid_product(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProduct {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    fn probability(name: &'static str, value: f64) -> Self {
        Self::ProbabilityOutOfRange { name, value }
    }
}

/// Validates a product list.
///
/// Checks:
/// 1. At least one product
/// 2. No duplicate names
/// 3. Unit value and unit volume are positive and finite
///
/// A `max_quantity` of zero is valid: the product simply cannot be picked.
pub fn validate_products(products: &[Product]) -> Result<(), ConfigError> {
    if products.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }

    let mut names = HashSet::new();
    for product in products {
        if !names.insert(product.name.as_str()) {
            return Err(ConfigError::DuplicateProduct {
                name: product.name.clone(),
            });
        }
        if !(product.unit_value.is_finite() && product.unit_value > 0.0) {
            return Err(ConfigError::invalid_product(
                &product.name,
                format!("unit value must be positive, got {}", product.unit_value),
            ));
        }
        if !(product.unit_volume.is_finite() && product.unit_volume > 0.0) {
            return Err(ConfigError::invalid_product(
                &product.name,
                format!("unit volume must be positive, got {}", product.unit_volume),
            ));
        }
    }

    Ok(())
}

/// Validates the van capacity.
pub fn validate_capacity(capacity: f64) -> Result<(), ConfigError> {
    if capacity.is_finite() && capacity > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCapacity(capacity))
    }
}

/// Validates GA hyperparameters.
pub fn validate_config(config: &GaConfig) -> Result<(), ConfigError> {
    if config.population_size == 0 {
        return Err(ConfigError::InvalidPopulationSize);
    }
    if config.generations == 0 {
        return Err(ConfigError::InvalidGenerations);
    }
    if !(0.0..=1.0).contains(&config.crossover_probability) {
        return Err(ConfigError::probability(
            "crossover_probability",
            config.crossover_probability,
        ));
    }
    if !(0.0..=1.0).contains(&config.mutation_probability) {
        return Err(ConfigError::probability(
            "mutation_probability",
            config.mutation_probability,
        ));
    }
    if config.elitism_count > config.population_size {
        return Err(ConfigError::InvalidElitism {
            elitism: config.elitism_count,
            population_size: config.population_size,
        });
    }
    if !(config.penalty_factor.is_finite() && config.penalty_factor > 0.0) {
        return Err(ConfigError::InvalidPenaltyFactor(config.penalty_factor));
    }
    if let SelectionType::Tournament { size: 0 } = config.selection {
        return Err(ConfigError::InvalidTournamentSize);
    }
    if let Some(early) = &config.early_stopping {
        validate_early_stopping(early)?;
    }
    Ok(())
}

fn validate_early_stopping(early: &EarlyStopping) -> Result<(), ConfigError> {
    if !(early.tolerance.is_finite() && early.tolerance >= 0.0) {
        return Err(ConfigError::InvalidEarlyStopping(format!(
            "tolerance must be non-negative and finite, got {}",
            early.tolerance
        )));
    }
    if early.patience == 0 {
        return Err(ConfigError::InvalidEarlyStopping(
            "patience must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
