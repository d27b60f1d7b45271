//! Generational GA engine.
//!
//! # State machine
//!
//! `Initialized → Running(generation) → Terminated(reason)`
//!
//! Each [`GaEngine::step`] processes one generation:
//!
//! 1. Evaluate every individual (optionally on the rayon pool).
//! 2. Record best / mean fitness into the [`FitnessHistory`].
//! 3. Update the best-ever individual (a deep copy, independent of the
//!    population).
//! 4. Check termination: generation limit, fitness plateau, stop signal.
//! 5. Otherwise breed the next population: elites are copied verbatim,
//!    the rest is filled by selection → crossover → mutation.
//!
//! Population replacement is a full barrier: selection only starts once
//! every fitness of the current generation is known.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::chromosome::{initialize_population, Individual};
use super::config::GaConfig;
use super::operators::GeneticOperators;
use super::problem::VanLoadProblem;
use super::selection::ParentSelector;
use crate::models::{Allocation, Catalog};
use crate::validation::{validate_capacity, ConfigError};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The configured generation count was reached.
    MaxGenerations,
    /// Best fitness plateaued for `patience` generations.
    Converged,
    /// An external [`StopSignal`] fired.
    Stopped,
}

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Population created, nothing evaluated yet.
    Initialized,
    /// The given generation is next to be evaluated.
    Running { generation: usize },
    /// No further steps will run.
    Terminated(TerminationReason),
}

/// Cooperative stop request, checked once per generation boundary.
///
/// Clones share the same flag, so one handle can be given to another
/// thread while the engine keeps the other.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl StopSignal {
    /// Creates a signal that only fires on [`StopSignal::stop`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Also fires once `limit` has elapsed from now.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Some(Instant::now() + limit);
        self
    }

    /// Requests termination.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether termination was requested or the deadline passed.
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Fitness summary of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Highest fitness in the generation.
    pub best_fitness: f64,
    /// Mean fitness of the generation.
    pub mean_fitness: f64,
    /// Lowest fitness in the generation.
    pub worst_fitness: f64,
    /// Individuals that fit in the van.
    pub feasible_count: usize,
    /// No individual fits in the van.
    pub all_infeasible: bool,
    /// Every individual has the same fitness; selection was uniform.
    pub degenerate: bool,
}

/// Per-generation fitness record, append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FitnessHistory {
    generations: Vec<GenerationStats>,
}

impl FitnessHistory {
    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// All records in generation order.
    pub fn generations(&self) -> &[GenerationStats] {
        &self.generations
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// Best fitness per generation (the series to plot).
    pub fn best_fitness(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Mean fitness per generation.
    pub fn mean_fitness(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.mean_fitness).collect()
    }

    fn push(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Best individual observed in any generation.
    pub best: Individual,
    /// Value / volume breakdown of `best`.
    pub allocation: Allocation,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Whether `best` fits in the van.
    pub best_is_feasible: bool,
    /// Generation in which `best` was first observed.
    pub best_generation: usize,
    /// Generations evaluated.
    pub generations_completed: usize,
    /// Why the run ended.
    pub termination: TerminationReason,
    /// Per-generation fitness record.
    pub history: FitnessHistory,
}

/// Generational GA over a van loading problem.
///
/// Owns its RNG for the whole run; concurrent runs each build their own
/// engine and therefore their own random stream.
///
/// # Example
/// ```
/// use van_load::ga::{GaConfig, GaEngine};
/// use van_load::models::{Catalog, Product};
///
/// let catalog = Catalog::new(vec![
///     Product::new("Laptop", 100.0, 2.0, 3),
///     Product::new("Phone", 50.0, 1.0, 5),
/// ])
/// .unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_generations(50)
///     .with_seed(42);
///
/// let result = GaEngine::new(catalog, 4.0, config).unwrap().run();
/// assert_eq!(result.generations_completed, 50);
/// assert!(result.best_is_feasible);
/// ```
#[derive(Debug)]
pub struct GaEngine {
    problem: VanLoadProblem,
    config: GaConfig,
    operators: GeneticOperators,
    rng: SmallRng,
    population: Vec<Individual>,
    state: EngineState,
    history: FitnessHistory,
    best: Option<(Individual, usize)>,
    stalled_generations: usize,
    stop_signal: Option<StopSignal>,
}

impl GaEngine {
    /// Validates the input and creates the initial population.
    #[instrument(level = "debug", skip(catalog, config), fields(products = catalog.len()))]
    pub fn new(catalog: Catalog, capacity: f64, config: GaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_capacity(capacity)?;

        let problem = VanLoadProblem::new(catalog, capacity, config.penalty_factor)
            .with_penalty_policy(config.penalty_policy);
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let population =
            initialize_population(problem.max_quantities(), config.population_size, &mut rng);

        tracing::debug!(
            population_size = config.population_size,
            generations = config.generations,
            seeded = config.seed.is_some(),
            "Initialized population"
        );

        Ok(Self {
            operators: config.operators(),
            problem,
            config,
            rng,
            population,
            state: EngineState::Initialized,
            history: FitnessHistory::default(),
            best: None,
            stalled_generations: 0,
            stop_signal: None,
        })
    }

    /// Attaches a cooperative stop signal.
    pub fn with_stop_signal(mut self, signal: StopSignal) -> Self {
        self.stop_signal = Some(signal);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current population.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// The problem being solved.
    pub fn problem(&self) -> &VanLoadProblem {
        &self.problem
    }

    /// Fitness recorded so far.
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// Best individual observed so far.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref().map(|(individual, _)| individual)
    }

    /// Whether the run has ended.
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, EngineState::Terminated(_))
    }

    /// Processes one generation and returns the new state.
    ///
    /// Does nothing once terminated.
    pub fn step(&mut self) -> EngineState {
        let generation = match self.state {
            EngineState::Initialized => 0,
            EngineState::Running { generation } => generation,
            EngineState::Terminated(_) => return self.state,
        };

        self.evaluate_population();
        let stats = self.record_generation(generation);
        let previous_best = self.best.as_ref().map(|(individual, _)| individual.fitness);
        self.update_best(generation);
        self.update_plateau(previous_best, stats.best_fitness);

        match self.termination_reason(generation + 1) {
            Some(reason) => {
                tracing::info!(
                    generations = generation + 1,
                    best_fitness = self.best().map(|b| b.fitness),
                    reason = ?reason,
                    "Run terminated"
                );
                self.state = EngineState::Terminated(reason);
            }
            None => {
                self.population = self.breed();
                self.state = EngineState::Running {
                    generation: generation + 1,
                };
            }
        }
        self.state
    }

    /// Runs until termination and returns the result.
    #[instrument(level = "debug", skip(self), fields(population_size = self.config.population_size, generations = self.config.generations))]
    pub fn run(mut self) -> GaResult {
        while !self.is_terminated() {
            self.step();
        }
        self.into_result()
    }

    fn into_result(self) -> GaResult {
        let termination = match self.state {
            EngineState::Terminated(reason) => reason,
            _ => TerminationReason::Stopped,
        };
        // A step always evaluates at least one individual, so `best` is only
        // missing when the engine never ran; fall back to the current population.
        let (best, best_generation) = self.best.unwrap_or_else(|| {
            let mut individual = self.population[0].clone();
            individual.fitness = self.problem.evaluate(&individual);
            (individual, 0)
        });
        let allocation = self.problem.decode(&best);
        let best_is_feasible = allocation.is_feasible();
        if !best_is_feasible {
            tracing::warn!(
                total_volume = allocation.total_volume,
                capacity = allocation.capacity,
                "Best allocation exceeds van capacity"
            );
        }

        GaResult {
            best_fitness: best.fitness,
            best,
            allocation,
            best_is_feasible,
            best_generation,
            generations_completed: self.history.len(),
            termination,
            history: self.history,
        }
    }

    fn evaluate_population(&mut self) {
        let problem = &self.problem;
        if self.config.parallel {
            self.population
                .par_iter_mut()
                .for_each(|individual| individual.fitness = problem.evaluate(individual));
        } else {
            for individual in &mut self.population {
                individual.fitness = problem.evaluate(individual);
            }
        }
    }

    fn record_generation(&mut self, generation: usize) -> GenerationStats {
        let fitness: Vec<f64> = self.population.iter().map(|ind| ind.fitness).collect();
        let best_fitness = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst_fitness = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;
        let feasible_count = self
            .population
            .iter()
            .filter(|ind| self.problem.is_feasible(&ind.genes))
            .count();

        let stats = GenerationStats {
            generation,
            best_fitness,
            mean_fitness,
            worst_fitness,
            feasible_count,
            all_infeasible: feasible_count == 0,
            degenerate: best_fitness == worst_fitness,
        };

        tracing::debug!(generation, best_fitness, mean_fitness, feasible_count, "Generation evaluated");
        if stats.all_infeasible {
            tracing::warn!(generation, "Every individual exceeds van capacity");
        }
        if stats.degenerate {
            tracing::warn!(generation, fitness = best_fitness, "All fitness values equal, selecting uniformly");
        }

        self.history.push(stats.clone());
        stats
    }

    fn update_best(&mut self, generation: usize) {
        let Some(champion) = self
            .population
            .iter()
            .reduce(|best, ind| if ind.fitness > best.fitness { ind } else { best })
        else {
            return;
        };
        let improved = match &self.best {
            Some((best, _)) => champion.fitness > best.fitness,
            None => true,
        };
        if improved {
            self.best = Some((champion.clone(), generation));
        }
    }

    fn update_plateau(&mut self, previous_best: Option<f64>, generation_best: f64) {
        let Some(early) = self.config.early_stopping else {
            return;
        };
        match previous_best {
            Some(previous) if generation_best - previous <= early.tolerance => {
                self.stalled_generations += 1;
            }
            _ => self.stalled_generations = 0,
        }
    }

    fn termination_reason(&self, completed: usize) -> Option<TerminationReason> {
        if completed >= self.config.generations {
            return Some(TerminationReason::MaxGenerations);
        }
        if let Some(early) = self.config.early_stopping {
            if self.stalled_generations >= early.patience {
                return Some(TerminationReason::Converged);
            }
        }
        if self.stop_signal.as_ref().is_some_and(StopSignal::is_stopped) {
            return Some(TerminationReason::Stopped);
        }
        None
    }

    fn breed(&mut self) -> Vec<Individual> {
        let size = self.config.population_size;
        let mut next = Vec::with_capacity(size);

        let mut ranked: Vec<usize> = (0..self.population.len()).collect();
        ranked.sort_by(|&a, &b| {
            self.population[b]
                .fitness
                .total_cmp(&self.population[a].fitness)
        });
        next.extend(
            ranked
                .iter()
                .take(self.config.elitism_count)
                .map(|&i| self.population[i].clone()),
        );

        let selector = ParentSelector::from_population(self.config.selection, &self.population);
        let max_quantities = self.problem.max_quantities();
        while next.len() < size {
            let (a, b) = selector.select_pair(&mut self.rng);
            let (mut c1, mut c2) =
                self.operators
                    .crossover(&self.population[a], &self.population[b], &mut self.rng);

            self.operators.mutate(&mut c1, max_quantities, &mut self.rng);
            next.push(c1);
            if next.len() < size {
                self.operators.mutate(&mut c2, max_quantities, &mut self.rng);
                next.push(c2);
            }
        }
        next
    }
}

/// One-call convenience over [`GaEngine`].
pub struct GaRunner;

impl GaRunner {
    /// Builds an engine and runs it to termination.
    pub fn run(catalog: Catalog, capacity: f64, config: GaConfig) -> Result<GaResult, ConfigError> {
        Ok(GaEngine::new(catalog, capacity, config)?.run())
    }

    /// Like [`GaRunner::run`], honoring an external stop signal.
    pub fn run_with_signal(
        catalog: Catalog,
        capacity: f64,
        config: GaConfig,
        signal: StopSignal,
    ) -> Result<GaResult, ConfigError> {
        Ok(GaEngine::new(catalog, capacity, config)?
            .with_stop_signal(signal)
            .run())
    }
}
