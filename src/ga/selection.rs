//! Parent selection.
//!
//! Both strategies sample with replacement: the same individual may be
//! picked as both parents, and any number of times per generation.
//!
//! # Roulette wheel
//!
//! Fitness is shifted so the worst individual sits at a small positive
//! floor, then used as a weight. Every individual keeps a non-zero chance,
//! ordering is preserved, and negative (penalized) fitness is handled.
//! When every fitness is equal there is no ordering to exploit and the
//! wheel falls back to a uniform draw.
//!
//! # Tournament
//!
//! Draws `size` contestants uniformly (with replacement) and keeps the
//! fittest. Ties go to the first contestant drawn.
//!
//! # Reference
//! Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes Used in GAs"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::Individual;

/// Share of the fitness range given to the worst individual as its weight.
const WEIGHT_FLOOR_SHARE: f64 = 0.01;

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SelectionType {
    /// Fitness-proportionate selection on shifted fitness.
    #[default]
    Roulette,
    /// Tournament selection with the given number of contestants.
    Tournament { size: usize },
}

/// Translates fitness into non-negative roulette weights.
///
/// Returns `None` when the population is degenerate: all fitness values are
/// equal (or the range is not finite), so proportional weights are
/// meaningless.
pub fn roulette_weights(fitness: &[f64]) -> Option<Vec<f64>> {
    let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
    let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return None;
    }
    let floor = range * WEIGHT_FLOOR_SHARE;
    Some(fitness.iter().map(|&f| f - min + floor).collect())
}

/// Chooses parent pairs from a scored population.
///
/// Built once per generation, after every fitness is known.
#[derive(Debug, Clone)]
pub struct ParentSelector {
    selection: SelectionType,
    fitness: Vec<f64>,
    /// Cumulative roulette weights; `None` when degenerate.
    cumulative: Option<Vec<f64>>,
}

impl ParentSelector {
    /// Prepares selection over `fitness` (one entry per individual).
    pub fn new(selection: SelectionType, fitness: &[f64]) -> Self {
        let cumulative = match selection {
            SelectionType::Roulette => roulette_weights(fitness).map(|weights| {
                weights
                    .iter()
                    .scan(0.0, |acc, w| {
                        *acc += w;
                        Some(*acc)
                    })
                    .collect()
            }),
            SelectionType::Tournament { .. } => None,
        };
        Self {
            selection,
            fitness: fitness.to_vec(),
            cumulative,
        }
    }

    /// Prepares selection over a scored population.
    pub fn from_population(selection: SelectionType, population: &[Individual]) -> Self {
        let fitness: Vec<f64> = population.iter().map(|ind| ind.fitness).collect();
        Self::new(selection, &fitness)
    }

    /// Whether every individual has the same fitness.
    pub fn is_degenerate(&self) -> bool {
        match self.fitness.first() {
            Some(&first) => self.fitness.iter().all(|&f| f == first),
            None => true,
        }
    }

    /// Selects one parent index.
    pub fn select<R: Rng>(&self, rng: &mut R) -> usize {
        let len = self.fitness.len();
        match self.selection {
            SelectionType::Roulette => match &self.cumulative {
                Some(cumulative) => {
                    let total = cumulative[len - 1];
                    let spin = rng.random::<f64>() * total;
                    cumulative.partition_point(|&c| c <= spin).min(len - 1)
                }
                None => rng.random_range(0..len),
            },
            SelectionType::Tournament { size } => {
                let mut winner = rng.random_range(0..len);
                for _ in 1..size {
                    let challenger = rng.random_range(0..len);
                    if self.fitness[challenger] > self.fitness[winner] {
                        winner = challenger;
                    }
                }
                winner
            }
        }
    }

    /// Selects a parent pair (indices, possibly equal).
    pub fn select_pair<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        (self.select(rng), self.select(rng))
    }
}

/// Selects a parent pair from a scored population.
///
/// Convenience for one-off selection; the engine builds a
/// [`ParentSelector`] once per generation instead.
pub fn select_parents<'a, R: Rng>(
    population: &'a [Individual],
    selection: SelectionType,
    rng: &mut R,
) -> (&'a Individual, &'a Individual) {
    let selector = ParentSelector::from_population(selection, population);
    let (a, b) = selector.select_pair(rng);
    (&population[a], &population[b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn histogram(selector: &ParentSelector, n: usize, draws: usize) -> Vec<usize> {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut counts = vec![0; n];
        for _ in 0..draws {
            counts[selector.select(&mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_weights_shift_negative_fitness() {
        let weights = roulette_weights(&[-100.0, 0.0, 50.0]).unwrap();
        assert!(weights.iter().all(|&w| w > 0.0));
        assert!(weights[0] < weights[1] && weights[1] < weights[2]);
        assert_eq!(weights[0], 1.5);
    }

    #[test]
    fn test_weights_degenerate() {
        assert!(roulette_weights(&[3.0, 3.0, 3.0]).is_none());
        assert!(roulette_weights(&[0.0]).is_none());
    }

    #[test]
    fn test_roulette_prefers_fitter() {
        let selector = ParentSelector::new(SelectionType::Roulette, &[-50.0, 10.0, 100.0]);
        let counts = histogram(&selector, 3, 20_000);
        assert!(counts[0] > 0, "worst individual must stay selectable");
        assert!(counts[0] < counts[1]);
        assert!(counts[1] < counts[2]);
    }

    #[test]
    fn test_roulette_degenerate_is_uniform() {
        let selector = ParentSelector::new(SelectionType::Roulette, &[0.0; 4]);
        assert!(selector.is_degenerate());
        let counts = histogram(&selector, 4, 20_000);
        for c in counts {
            assert!((4_000..6_000).contains(&c), "count {c} not near 5000");
        }
    }

    #[test]
    fn test_tournament_prefers_fitter() {
        let selector = ParentSelector::new(SelectionType::Tournament { size: 3 }, &[1.0, 2.0, 3.0]);
        assert!(!selector.is_degenerate());
        let counts = histogram(&selector, 3, 20_000);
        assert!(counts[0] > 0);
        assert!(counts[0] < counts[1]);
        assert!(counts[1] < counts[2]);
    }

    #[test]
    fn test_single_individual() {
        let selector = ParentSelector::new(SelectionType::Roulette, &[7.0]);
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(selector.select_pair(&mut rng), (0, 0));
    }

    #[test]
    fn test_select_parents_with_replacement() {
        let mut population = vec![Individual::new(vec![1]), Individual::new(vec![2])];
        population[0].fitness = 0.0;
        population[1].fitness = 1000.0;

        let mut rng = SmallRng::seed_from_u64(42);
        let same_twice = (0..200)
            .map(|_| select_parents(&population, SelectionType::Roulette, &mut rng))
            .filter(|(a, b)| a.genes == b.genes)
            .count();
        assert!(same_twice > 0);
    }
}
