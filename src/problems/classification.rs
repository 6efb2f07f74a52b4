use super::RunReport;
use crate::config::ClassificationConfig;
use crate::data::{DataSplit, DataSplitter, DatasetConnector, Record, SplitWriter, StratifiedSplitter};
use crate::data::splitters::SplitConfig;
use crate::engines::evaluation::ClassificationOracle;
use crate::engines::generation::{
    ConstantTerminal, EvolutionEngine, Function, NodeSet, ProgressCallback, Program,
};
use crate::error::Result;
use crate::types::NUM_FEATURES;
use std::path::Path;

/// Variable names bound to the nine measurements, in record order
pub const FEATURE_VARIABLES: [&str; NUM_FEATURES] =
    ["CT", "USz", "UShp", "MA", "SESz", "BN", "BC", "NN", "M"];

/// Range every ephemeral constant is drawn from
pub const CONSTANT_RANGE: (f64, f64) = (0.0, 100.0);

pub fn node_set() -> NodeSet {
    NodeSet::new("breast_cancer")
        .with_variables(FEATURE_VARIABLES)
        .with_constant(ConstantTerminal::new(CONSTANT_RANGE.0, CONSTANT_RANGE.1))
        .with_constant(ConstantTerminal::new(CONSTANT_RANGE.0, CONSTANT_RANGE.1))
        .with_functions(&[
            Function::Add,
            Function::Subtract,
            Function::Multiply,
            Function::Divide,
        ])
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    DatasetConnector::load(path)
}

/// Stratified split with a fresh random shuffle
pub fn split(records: &[Record], ratio: f64) -> Result<DataSplit> {
    split_seeded(records, ratio, None)
}

pub fn split_seeded(records: &[Record], ratio: f64, seed: Option<u64>) -> Result<DataSplit> {
    StratifiedSplitter::with_config(SplitConfig {
        training_ratio: ratio,
        seed,
    })?
    .split(records)
}

pub fn build_classification_oracle(training_set: Vec<Record>) -> ClassificationOracle {
    ClassificationOracle::new(training_set)
}

/// Share of `dataset` the program labels correctly, in [0, 1]
pub fn evaluate_accuracy(program: &Program, dataset: &[Record]) -> Result<f64> {
    let mut context = node_set().new_context();
    ClassificationOracle::accuracy(program, dataset, &mut context)
}

/// Load, split and persist the dataset, evolve a classifier on the training
/// half and score the winner on the held-out half.
pub fn run<C: ProgressCallback>(config: &ClassificationConfig, callback: &mut C) -> Result<RunReport> {
    let (records, metadata) = DatasetConnector::load_and_validate(&config.dataset_path, Some(2))?;
    log::info!(
        "Dataset {}: {} benign, {} malignant, {} with missing measurements",
        metadata.file_path,
        metadata.num_benign,
        metadata.num_malignant,
        metadata.records_with_missing
    );

    let data_split = split_seeded(&records, config.split_ratio, config.split_seed)?;
    SplitWriter::persist(&data_split, &config.training_output_path, &config.test_output_path)?;

    let summary = data_split.summary();
    for (label, counts) in &summary.classes {
        log::info!(
            "{}: {} training, {} test ({:.1}% training)",
            label,
            counts.training,
            counts.test,
            counts.training_fraction() * 100.0
        );
    }

    let mut engine = EvolutionEngine::new(config.evolution.clone(), node_set())?;
    let population = engine.initialize_population(config.evolution.population_size);
    let oracle = build_classification_oracle(data_split.training.clone());
    let evolved = engine.evolve(population, &oracle, config.evolution.num_generations, callback)?;

    let best = EvolutionEngine::best_program(&evolved)?;
    let test_accuracy = evaluate_accuracy(&best, &data_split.test)?;
    log::info!(
        "Best program: {} (test accuracy {:.2}%)",
        best.to_formula_short(120),
        test_accuracy * 100.0
    );

    let mut report = RunReport::from_run("classification", &evolved, engine.get_hall_of_fame())?;
    report.test_accuracy = Some(test_accuracy);
    report.split = Some(summary);
    Ok(report)
}
