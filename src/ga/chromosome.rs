//! Bounded integer-vector chromosome for van loading.
//!
//! # Encoding
//!
//! One gene per catalog product. Gene `i` is the number of units of
//! product `i` loaded into the van, and must stay within
//! `0..=max_quantity[i]`. Bounds live with the operators below, not with
//! the chromosome type: every function that can produce a gene takes the
//! bound vector and never writes a value outside it.
//!
//! # Reference
//! Michalewicz (1996), "Genetic Algorithms + Data Structures = Evolution Programs", Ch. 6

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A candidate allocation paired with its cached fitness.
///
/// Higher fitness = better allocation (maximization convention).
/// Operators that change genes reset the cached fitness to
/// `f64::NEG_INFINITY` so a stale score is never carried forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Picked quantity per product, in catalog order.
    pub genes: Vec<u32>,
    /// Cached fitness (higher = better).
    pub fitness: f64,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(genes: Vec<u32>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Creates a random individual, drawing each gene uniformly from
    /// `0..=max_quantities[i]`.
    pub fn random<R: Rng>(max_quantities: &[u32], rng: &mut R) -> Self {
        let genes = max_quantities
            .iter()
            .map(|&max| rng.random_range(0..=max))
            .collect();
        Self::new(genes)
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether the fitness has been computed since the last gene change.
    pub fn is_evaluated(&self) -> bool {
        self.fitness != f64::NEG_INFINITY
    }

    /// Validates length and per-gene bounds.
    pub fn is_within_bounds(&self, max_quantities: &[u32]) -> bool {
        self.genes.len() == max_quantities.len()
            && self
                .genes
                .iter()
                .zip(max_quantities)
                .all(|(&gene, &max)| gene <= max)
    }
}

/// Builds the first generation.
pub fn initialize_population<R: Rng>(
    max_quantities: &[u32],
    population_size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    (0..population_size)
        .map(|_| Individual::random(max_quantities, rng))
        .collect()
}

// ======================== Crossover operators ========================

/// Single-point crossover.
///
/// Picks a cut index uniformly in `[1, len - 1]`. Child 1 takes parent 1's
/// genes before the cut and parent 2's from the cut onward; child 2 is the
/// complement. Chromosomes shorter than 2 genes have no cut point and are
/// returned as copies.
pub fn single_point_crossover<R: Rng>(
    p1: &Individual,
    p2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let len = p1.genes.len().min(p2.genes.len());
    if len < 2 {
        return (p1.clone(), p2.clone());
    }
    let cut = rng.random_range(1..len);
    (
        splice(&p1.genes, &p2.genes, cut, len),
        splice(&p2.genes, &p1.genes, cut, len),
    )
}

/// Two-point crossover.
///
/// Picks `1 <= a < b <= len - 1` and swaps the `[a, b)` segment between
/// parents. Falls back to single-point when the chromosome is too short
/// for two distinct cuts.
pub fn two_point_crossover<R: Rng>(
    p1: &Individual,
    p2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let len = p1.genes.len().min(p2.genes.len());
    if len < 3 {
        return single_point_crossover(p1, p2, rng);
    }
    let a = rng.random_range(1..len - 1);
    let b = rng.random_range(a + 1..len);

    let mut c1 = p1.genes.clone();
    let mut c2 = p2.genes.clone();
    c1[a..b].copy_from_slice(&p2.genes[a..b]);
    c2[a..b].copy_from_slice(&p1.genes[a..b]);
    (Individual::new(c1), Individual::new(c2))
}

/// Uniform crossover: each position is swapped between the children with
/// probability 0.5.
pub fn uniform_crossover<R: Rng>(
    p1: &Individual,
    p2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let (c1, c2): (Vec<u32>, Vec<u32>) = p1
        .genes
        .iter()
        .zip(&p2.genes)
        .map(|(&a, &b)| if rng.random_bool(0.5) { (a, b) } else { (b, a) })
        .unzip();
    (Individual::new(c1), Individual::new(c2))
}

fn splice(head: &[u32], tail: &[u32], cut: usize, len: usize) -> Individual {
    let mut genes = Vec::with_capacity(len);
    genes.extend_from_slice(&head[..cut]);
    genes.extend_from_slice(&tail[cut..len]);
    Individual::new(genes)
}

// ======================== Mutation operators ========================

/// Random-reset mutation: each gene, with probability `probability`, is
/// redrawn uniformly from `0..=max_quantities[i]`.
pub fn random_reset_mutation<R: Rng>(
    chromosome: &mut Individual,
    max_quantities: &[u32],
    probability: f64,
    rng: &mut R,
) {
    let mut changed = false;
    for (gene, &max) in chromosome.genes.iter_mut().zip(max_quantities) {
        if rng.random_bool(probability) {
            *gene = rng.random_range(0..=max);
            changed = true;
        }
    }
    if changed {
        chromosome.fitness = f64::NEG_INFINITY;
    }
}

/// Creep mutation: each gene, with probability `probability`, moves one
/// unit up or down, clamped to `0..=max_quantities[i]`.
pub fn creep_mutation<R: Rng>(
    chromosome: &mut Individual,
    max_quantities: &[u32],
    probability: f64,
    rng: &mut R,
) {
    let mut changed = false;
    for (gene, &max) in chromosome.genes.iter_mut().zip(max_quantities) {
        if rng.random_bool(probability) {
            let nudged = if rng.random_bool(0.5) {
                gene.saturating_add(1)
            } else {
                gene.saturating_sub(1)
            };
            *gene = nudged.min(max);
            changed = true;
        }
    }
    if changed {
        chromosome.fitness = f64::NEG_INFINITY;
    }
}
