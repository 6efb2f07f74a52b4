use std::sync::mpsc;
use symgp::config::EvolutionConfig;
use symgp::engines::generation::{
    ChannelProgressCallback, EvolutionEngine, LogProgressCallback, ProgressMessage,
};
use symgp::engines::evaluation::FitnessFunction;
use symgp::problems::{classification, regression};
use symgp::data::Record;
use symgp::OptimizationDirection;

/// Create a minimal evolution config for fast testing
fn create_test_evolution_config(seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 40,
        num_generations: 8,
        min_init_depth: 1,
        max_init_depth: 3,
        max_crossover_depth: 6,
        tournament_size: 3,
        hall_of_fame_size: 3,
        seed: Some(seed),
        ..EvolutionConfig::default()
    }
}

/// Malignant exactly when clump thickness is at least 6
fn separable_records() -> Vec<Record> {
    (0..60)
        .map(|i| {
            let ct = (i % 10) as i32 + 1;
            let label = if ct >= 6 { 4 } else { 2 };
            Record::new(i, &[ct, 2, 2, 1, 2, 1, 3, 1, 1], label).unwrap()
        })
        .collect()
}

#[test_log::test]
fn test_regression_evolution_improves_and_reports() {
    let inputs: Vec<f64> = (-5..=5).map(f64::from).collect();
    let outputs: Vec<f64> = inputs.iter().map(|x| x * x + 1.0).collect();
    let oracle = regression::build_regression_oracle(inputs, outputs).unwrap();

    let mut engine = EvolutionEngine::new(create_test_evolution_config(42), regression::node_set()).unwrap();
    let population = engine.initialize_population(40);
    let (sender, receiver) = mpsc::channel();
    let mut callback = ChannelProgressCallback::new(sender);

    let evolved = engine.evolve(population, &oracle, 8, &mut callback).unwrap();
    drop(callback);

    let messages: Vec<ProgressMessage> = receiver.iter().collect();
    assert_eq!(messages.len(), 8 * 3);
    assert_eq!(messages[0], ProgressMessage::GenerationStart(0));

    // Best fitness reported per generation never gets worse for the all-time best
    let best = evolved.all_time_best.as_ref().unwrap().fitness.unwrap();
    let first_generation_best = messages
        .iter()
        .find_map(|m| match m {
            ProgressMessage::GenerationComplete { best_fitness, .. } => Some(*best_fitness),
            _ => None,
        })
        .unwrap();
    assert!(best <= first_generation_best);

    let hof = engine.get_hall_of_fame();
    assert_eq!(hof.direction(), OptimizationDirection::Minimize);
    assert!(!hof.is_empty());
    assert_eq!(hof.get_all()[0].fitness, best);
}

#[test_log::test]
fn test_classification_evolution_finds_separator() {
    let records = separable_records();
    let split = classification::split_seeded(&records, 0.8, Some(9)).unwrap();
    let oracle = classification::build_classification_oracle(split.training.clone());
    assert_eq!(oracle.direction(), OptimizationDirection::Maximize);

    let mut engine =
        EvolutionEngine::new(create_test_evolution_config(7), classification::node_set()).unwrap();
    let population = engine.initialize_population(40);
    let mut callback = LogProgressCallback::default();
    let evolved = engine.evolve(population, &oracle, 8, &mut callback).unwrap();

    let best = EvolutionEngine::best_program(&evolved).unwrap();
    let fitness = evolved.all_time_best.as_ref().unwrap().fitness.unwrap();
    assert!((0.0..=100.0).contains(&fitness));

    let accuracy = classification::evaluate_accuracy(&best, &split.test).unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
}

#[test]
fn test_run_report_serializes() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("symgp-{}-regression.txt", std::process::id()));
    std::fs::write(&path, "Quadratic\n\n0 1\n1 2\n2 5\n3 10\n").unwrap();

    let config = symgp::config::RegressionConfig {
        training_path: path.clone(),
        evolution: EvolutionConfig {
            num_generations: 3,
            population_size: 20,
            ..create_test_evolution_config(3)
        },
    };
    let report = regression::run(&config, &mut LogProgressCallback::default()).unwrap();
    assert_eq!(report.problem, "regression");
    assert_eq!(report.generations, 3);
    assert!(report.test_accuracy.is_none());

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["direction"], "Minimize");
    assert!(value["completed_at"].is_string());

    std::fs::remove_file(&path).ok();
}
