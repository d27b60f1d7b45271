//! Van loading GA problem definition.
//!
//! Bridges the domain models (`Catalog`, capacity) to the GA: creates
//! random individuals, scores them, and decodes them into allocations.
//!
//! # Fitness
//!
//! Feasible allocations (`volume <= capacity`) score their total value,
//! exactly. Over-capacity allocations are kept in the search but penalized
//! according to the [`PenaltyPolicy`], so the score may go negative.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::Individual;
use crate::models::{Allocation, Catalog};

/// How over-capacity allocations are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyPolicy {
    /// `value - penalty_factor * (volume - capacity)`.
    #[default]
    Linear,
    /// `-volume`: any over-capacity allocation ranks below every feasible
    /// one, and fuller vans rank lower.
    NegatedVolume,
}

/// Scores quantity vectors under a soft capacity constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessEvaluator {
    /// Van capacity.
    pub capacity: f64,
    /// Penalty per unit of excess volume (linear policy).
    pub penalty_factor: f64,
    /// Over-capacity scoring rule.
    pub policy: PenaltyPolicy,
}

impl FitnessEvaluator {
    /// Creates a linear-penalty evaluator.
    pub fn new(capacity: f64, penalty_factor: f64) -> Self {
        Self {
            capacity,
            penalty_factor,
            policy: PenaltyPolicy::Linear,
        }
    }

    /// Sets the penalty policy.
    pub fn with_policy(mut self, policy: PenaltyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fitness of a quantity vector.
    pub fn evaluate(&self, genes: &[u32], catalog: &Catalog) -> f64 {
        self.score(catalog.total_value(genes), catalog.total_volume(genes))
    }

    /// Fitness from precomputed totals.
    pub fn score(&self, total_value: f64, total_volume: f64) -> f64 {
        if total_volume <= self.capacity {
            return total_value;
        }
        match self.policy {
            PenaltyPolicy::Linear => {
                total_value - self.penalty_factor * (total_volume - self.capacity)
            }
            PenaltyPolicy::NegatedVolume => -total_volume,
        }
    }
}

/// GA problem definition for van loading.
///
/// # Example
/// ```
/// use van_load::ga::VanLoadProblem;
/// use van_load::models::{Catalog, Product};
///
/// let catalog = Catalog::new(vec![Product::new("Laptop", 10.0, 1.0, 5)]).unwrap();
/// let problem = VanLoadProblem::new(catalog, 5.0, 1000.0);
/// assert_eq!(problem.fitness_of(&[3]), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct VanLoadProblem {
    catalog: Catalog,
    evaluator: FitnessEvaluator,
    max_quantities: Vec<u32>,
}

impl VanLoadProblem {
    /// Creates a problem with a linear penalty.
    pub fn new(catalog: Catalog, capacity: f64, penalty_factor: f64) -> Self {
        let max_quantities = catalog.max_quantities();
        Self {
            catalog,
            evaluator: FitnessEvaluator::new(capacity, penalty_factor),
            max_quantities,
        }
    }

    /// Sets the penalty policy.
    pub fn with_penalty_policy(mut self, policy: PenaltyPolicy) -> Self {
        self.evaluator = self.evaluator.with_policy(policy);
        self
    }

    /// The product catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The van capacity.
    pub fn capacity(&self) -> f64 {
        self.evaluator.capacity
    }

    /// The fitness evaluator.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// Per-gene upper bounds, in catalog order.
    pub fn max_quantities(&self) -> &[u32] {
        &self.max_quantities
    }

    /// Creates a random in-bounds individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual {
        Individual::random(&self.max_quantities, rng)
    }

    /// Fitness of a quantity vector.
    pub fn fitness_of(&self, genes: &[u32]) -> f64 {
        self.evaluator.evaluate(genes, &self.catalog)
    }

    /// Fitness of an individual (does not update its cache).
    pub fn evaluate(&self, individual: &Individual) -> f64 {
        self.fitness_of(&individual.genes)
    }

    /// Whether a quantity vector fits in the van.
    pub fn is_feasible(&self, genes: &[u32]) -> bool {
        self.catalog.total_volume(genes) <= self.evaluator.capacity
    }

    /// Decodes an individual into an allocation breakdown.
    pub fn decode(&self, individual: &Individual) -> Allocation {
        Allocation::calculate(&self.catalog, &individual.genes, self.evaluator.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn make_test_problem() -> VanLoadProblem {
        let catalog = Catalog::new(vec![
            Product::new("Laptop", 100.0, 2.0, 3),
            Product::new("Phone", 50.0, 1.0, 5),
        ])
        .unwrap();
        VanLoadProblem::new(catalog, 4.0, 1000.0)
    }

    #[test]
    fn test_feasible_fitness_is_value() {
        let catalog = Catalog::new(vec![Product::new("Box", 10.0, 1.0, 5)]).unwrap();
        let problem = VanLoadProblem::new(catalog, 5.0, 1000.0);
        assert_eq!(problem.fitness_of(&[3]), 30.0);
        assert_eq!(problem.fitness_of(&[5]), 50.0);
        assert_eq!(problem.fitness_of(&[0]), 0.0);
    }

    #[test]
    fn test_linear_penalty() {
        let problem = make_test_problem();
        // value 300 + 50, volume 7 → 3 over capacity
        let fitness = problem.fitness_of(&[3, 1]);
        assert_eq!(fitness, 350.0 - 1000.0 * 3.0);
        assert!(fitness < 0.0);
    }

    #[test]
    fn test_penalty_strictly_decreasing_in_volume() {
        let evaluator = FitnessEvaluator::new(4.0, 10.0);
        let mut previous = evaluator.score(100.0, 4.5);
        for step in 1..20 {
            let volume = 4.5 + step as f64 * 0.5;
            let current = evaluator.score(100.0, volume);
            assert!(current < previous);
            previous = current;
        }

        let evaluator = evaluator.with_policy(PenaltyPolicy::NegatedVolume);
        assert!(evaluator.score(100.0, 6.0) < evaluator.score(100.0, 5.0));
    }

    #[test]
    fn test_negated_volume_policy() {
        let problem = make_test_problem().with_penalty_policy(PenaltyPolicy::NegatedVolume);
        assert_eq!(problem.fitness_of(&[3, 1]), -7.0);
        assert_eq!(problem.fitness_of(&[1, 2]), 200.0);
    }

    #[test]
    fn test_boundary_is_feasible() {
        let problem = make_test_problem();
        assert!(problem.is_feasible(&[2, 0]));
        assert_eq!(problem.fitness_of(&[2, 0]), 200.0);
        assert!(!problem.is_feasible(&[2, 1]));
    }

    #[test]
    fn test_create_and_decode() {
        let problem = make_test_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let ind = problem.create_individual(&mut rng);
        assert!(ind.is_within_bounds(problem.max_quantities()));

        let alloc = problem.decode(&ind);
        assert_eq!(alloc.quantities, ind.genes);
        assert_eq!(alloc.capacity, 4.0);
        assert_eq!(alloc.is_feasible(), problem.is_feasible(&ind.genes));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let problem = make_test_problem();
        let ind = Individual::new(vec![1, 3]);
        assert_eq!(problem.evaluate(&ind), problem.evaluate(&ind));
        assert_eq!(problem.evaluate(&ind), 250.0 - 1000.0);
    }
}
