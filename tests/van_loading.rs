use van_load::ga::{
    CrossoverType, GaConfig, GaEngine, GaRunner, MutationType, PenaltyPolicy, SelectionType,
    StopSignal, TerminationReason,
};
use van_load::models::{Catalog, Product};
use van_load::ConfigError;

fn two_product_catalog() -> Catalog {
    Catalog::new(vec![
        Product::new("Laptop", 100.0, 2.0, 3),
        Product::new("Phone", 50.0, 1.0, 5),
    ])
    .unwrap()
}

fn shop_catalog() -> Catalog {
    Catalog::new(vec![
        Product::new("Refrigerator", 999.9, 0.751, 2),
        Product::new("Cell phone", 2199.12, 0.00000899, 5),
        Product::new("TV 55", 4346.99, 0.400, 1),
        Product::new("TV 50", 3999.90, 0.290, 3),
        Product::new("TV 42", 2999.00, 0.200, 2),
        Product::new("Notebook A", 2499.90, 0.00350, 4),
        Product::new("Ventilator", 199.90, 0.496, 1),
        Product::new("Microwave A", 308.66, 0.0424, 2),
        Product::new("Microwave B", 429.90, 0.0544, 3),
        Product::new("Microwave C", 299.29, 0.0319, 1),
        Product::new("Refrigerator B", 849.00, 0.635, 2),
        Product::new("Refrigerator C", 1199.89, 0.870, 1),
        Product::new("Notebook B", 1999.90, 0.498, 2),
        Product::new("Notebook C", 3999.00, 0.527, 1),
    ])
    .unwrap()
}

#[test]
fn test_end_to_end_two_products() {
    let config = GaConfig::default()
        .with_population_size(20)
        .with_generations(50)
        .with_seed(42);

    let result = GaRunner::run(two_product_catalog(), 4.0, config).unwrap();

    assert_eq!(result.termination, TerminationReason::MaxGenerations);
    assert_eq!(result.generations_completed, 50);
    assert_eq!(result.history.len(), 50);
    assert!(result.best_is_feasible);
    assert!(result.allocation.total_volume <= 4.0);
    assert_eq!(result.allocation.quantities, result.best.genes);
}

#[test]
fn test_same_seed_is_bit_identical() {
    let config = GaConfig::default()
        .with_population_size(30)
        .with_generations(40)
        .with_mutation_probability(0.2)
        .with_seed(7);

    let a = GaRunner::run(shop_catalog(), 3.0, config.clone()).unwrap();
    let b = GaRunner::run(shop_catalog(), 3.0, config).unwrap();

    let bits = |v: Vec<f64>| v.into_iter().map(f64::to_bits).collect::<Vec<_>>();
    assert_eq!(bits(a.history.best_fitness()), bits(b.history.best_fitness()));
    assert_eq!(bits(a.history.mean_fitness()), bits(b.history.mean_fitness()));
    assert_eq!(a.best.genes, b.best.genes);
    assert_eq!(a.best_fitness.to_bits(), b.best_fitness.to_bits());
}

#[test]
fn test_every_operator_combination_respects_bounds() {
    let catalog = shop_catalog();
    let bounds = catalog.max_quantities();
    for selection in [SelectionType::Roulette, SelectionType::Tournament { size: 3 }] {
        for crossover in [
            CrossoverType::SinglePoint,
            CrossoverType::TwoPoint,
            CrossoverType::Uniform,
        ] {
            for mutation in [MutationType::RandomReset, MutationType::Creep] {
                let config = GaConfig::default()
                    .with_population_size(16)
                    .with_generations(15)
                    .with_mutation_probability(0.3)
                    .with_selection(selection)
                    .with_crossover_type(crossover)
                    .with_mutation_type(mutation)
                    .with_seed(3);
                let mut engine = GaEngine::new(catalog.clone(), 2.0, config).unwrap();
                while !engine.is_terminated() {
                    engine.step();
                    assert!(engine
                        .population()
                        .iter()
                        .all(|ind| ind.is_within_bounds(&bounds)));
                }
                let best = engine.history().best_fitness();
                assert!(best.windows(2).all(|w| w[1] >= w[0]));
            }
        }
    }
}

#[test]
fn test_shop_catalog_converges_to_feasible_load() {
    let config = GaConfig::default()
        .with_population_size(60)
        .with_generations(200)
        .with_elitism_count(2)
        .with_penalty_policy(PenaltyPolicy::NegatedVolume)
        .with_seed(42);

    let result = GaRunner::run(shop_catalog(), 3.0, config).unwrap();
    assert!(result.best_is_feasible);
    assert!(result.allocation.total_value > 0.0);
    assert_eq!(result.best_fitness, result.allocation.total_value);
}

#[test]
fn test_stop_signal_from_another_thread() {
    let signal = StopSignal::new();
    let handle = signal.clone();
    std::thread::spawn(move || handle.stop()).join().unwrap();

    let config = GaConfig::default().with_generations(10_000).with_seed(1);
    let result = GaRunner::run_with_signal(two_product_catalog(), 4.0, config, signal).unwrap();
    assert_eq!(result.termination, TerminationReason::Stopped);
    assert_eq!(result.generations_completed, 1);
}

#[test]
fn test_unseeded_runs_complete() {
    let config = GaConfig::default()
        .with_population_size(10)
        .with_generations(5)
        .unseeded();
    let result = GaRunner::run(two_product_catalog(), 4.0, config).unwrap();
    assert_eq!(result.generations_completed, 5);
}

#[test]
fn test_configuration_errors() {
    let catalog = two_product_catalog();

    let err = GaEngine::new(catalog.clone(), 4.0, GaConfig::default().with_population_size(0))
        .unwrap_err();
    assert_eq!(err, ConfigError::InvalidPopulationSize);

    let err = GaEngine::new(catalog.clone(), 4.0, GaConfig::default().with_generations(0))
        .unwrap_err();
    assert_eq!(err, ConfigError::InvalidGenerations);

    assert!(matches!(
        GaConfig::from_json_str(r#"{"generations": -1}"#),
        Err(ConfigError::Parse(_))
    ));

    let err = GaEngine::new(
        catalog,
        4.0,
        GaConfig::default().with_crossover_probability(1.5),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ProbabilityOutOfRange { .. }));

    assert_eq!(Catalog::new(vec![]).unwrap_err(), ConfigError::EmptyCatalog);
}

#[test]
fn test_result_serializes_for_reporting() {
    let config = GaConfig::default().with_generations(3).with_seed(42);
    let result = GaRunner::run(two_product_catalog(), 4.0, config).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["history"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["termination"], "max_generations");
    assert_eq!(json["allocation"]["lines"][0]["product"], "Laptop");
}
