//! GA-based van loading optimization.
//!
//! Approximates the bounded multi-item knapsack: choose an integer
//! quantity of every catalog product so the van's value is maximal while
//! its volume stays within capacity.
//!
//! # Encoding
//!
//! A chromosome is a plain vector of bounded integers, one gene per
//! product, in catalog order. Gene `i` lies in `0..=max_quantity[i]`
//! after every operator.
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Martello & Toth (1990), "Knapsack Problems", Ch. 3 (Bounded knapsack)

mod chromosome;
mod config;
mod engine;
pub mod operators;
mod problem;
mod selection;

pub use chromosome::{
    creep_mutation, initialize_population, random_reset_mutation, single_point_crossover,
    two_point_crossover, uniform_crossover, Individual,
};
pub use config::{EarlyStopping, GaConfig};
pub use engine::{
    EngineState, FitnessHistory, GaEngine, GaResult, GaRunner, GenerationStats, StopSignal,
    TerminationReason,
};
pub use operators::{CrossoverType, GeneticOperators, MutationType};
pub use problem::{FitnessEvaluator, PenaltyPolicy, VanLoadProblem};
pub use selection::{roulette_weights, select_parents, ParentSelector, SelectionType};
