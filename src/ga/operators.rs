//! Configurable genetic operators for van loading.
//!
//! Provides runtime-selectable crossover and mutation strategies via
//! [`GeneticOperators`], together with the probabilities they fire with.
//!
//! # Usage
//!
//! ```
//! use van_load::ga::operators::{CrossoverType, GeneticOperators, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::SinglePoint);
//! assert_eq!(ops.mutation_type, MutationType::RandomReset);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{
    creep_mutation, random_reset_mutation, single_point_crossover, two_point_crossover,
    uniform_crossover, Individual,
};

/// Crossover strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverType {
    /// One cut point, tails swapped.
    #[default]
    SinglePoint,
    /// Two cut points, middle segment swapped.
    #[serde(alias = "two_points")]
    TwoPoint,
    /// Each gene swapped with probability 0.5.
    Uniform,
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// Redraw the gene uniformly from `0..=max_quantity`.
    #[default]
    #[serde(alias = "random")]
    RandomReset,
    /// Move the gene by one unit, clamped to `0..=max_quantity`.
    Creep,
}

/// Runtime-selectable genetic operators.
///
/// # Example
///
/// ```
/// use van_load::ga::operators::{CrossoverType, GeneticOperators, MutationType};
///
/// let ops = GeneticOperators {
///     crossover_type: CrossoverType::Uniform,
///     mutation_type: MutationType::Creep,
///     crossover_probability: 0.8,
///     mutation_probability: 0.1,
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation strategy.
    pub mutation_type: MutationType,
    /// Probability a selected pair is recombined (else copied through).
    pub crossover_probability: f64,
    /// Per-gene mutation probability.
    pub mutation_probability: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_type: CrossoverType::SinglePoint,
            mutation_type: MutationType::RandomReset,
            crossover_probability: 0.9,
            mutation_probability: 0.05,
        }
    }
}

impl GeneticOperators {
    /// Recombines two parents with the configured probability.
    ///
    /// Below the probability the parents are returned as copies.
    pub fn crossover<R: Rng>(
        &self,
        p1: &Individual,
        p2: &Individual,
        rng: &mut R,
    ) -> (Individual, Individual) {
        if !rng.random_bool(self.crossover_probability) {
            return (p1.clone(), p2.clone());
        }
        match self.crossover_type {
            CrossoverType::SinglePoint => single_point_crossover(p1, p2, rng),
            CrossoverType::TwoPoint => two_point_crossover(p1, p2, rng),
            CrossoverType::Uniform => uniform_crossover(p1, p2, rng),
        }
    }

    /// Mutates in place using the configured strategy.
    pub fn mutate<R: Rng>(&self, chromosome: &mut Individual, max_quantities: &[u32], rng: &mut R) {
        match self.mutation_type {
            MutationType::RandomReset => {
                random_reset_mutation(chromosome, max_quantities, self.mutation_probability, rng)
            }
            MutationType::Creep => {
                creep_mutation(chromosome, max_quantities, self.mutation_probability, rng)
            }
        }
    }
}
