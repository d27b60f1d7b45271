//! Van loading optimization.
//!
//! Chooses how many units of each catalog product to load into a van of
//! limited volume so that the total transported value is as high as
//! possible. The problem is a bounded multi-item knapsack; it is solved
//! approximately with a generational genetic algorithm.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Product`, `Catalog`, `Allocation`
//! - **`ga`**: Chromosome, fitness, selection, crossover, mutation and the
//!   generational engine
//! - **`validation`**: Input checks and the `ConfigError` type
//!
//! # Example
//!
//! ```
//! use van_load::ga::{GaConfig, GaRunner};
//! use van_load::models::{Catalog, Product};
//!
//! let catalog = Catalog::new(vec![
//!     Product::new("Laptop", 100.0, 2.0, 3),
//!     Product::new("Phone", 50.0, 1.0, 5),
//! ])?;
//! let config = GaConfig::default().with_population_size(20).with_seed(42);
//! let result = GaRunner::run(catalog, 4.0, config)?;
//!
//! for line in result.allocation.picked() {
//!     println!("{}: {}", line.product, line.quantity);
//! }
//! # Ok::<(), van_load::ConfigError>(())
//! ```
//!
//! Loading the catalog, reading configuration files, rendering reports
//! and plotting the fitness history are left to the caller; every output
//! type derives `Serialize` for that purpose.
//!
//! # References
//!
//! - Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer Implementations"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

pub mod ga;
pub mod models;
pub mod validation;

pub use validation::ConfigError;
