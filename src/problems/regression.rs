use super::RunReport;
use crate::config::RegressionConfig;
use crate::data::{RegressionConnector, RegressionData};
use crate::engines::evaluation::RegressionOracle;
use crate::engines::generation::{ConstantTerminal, EvolutionEngine, Function, NodeSet, ProgressCallback};
use crate::error::Result;
use std::path::Path;

pub const INPUT_VARIABLE: &str = "X";

pub const CONSTANT_RANGE: (f64, f64) = (0.0, 100.0);

pub fn node_set() -> NodeSet {
    NodeSet::new("regression")
        .with_variables([INPUT_VARIABLE])
        .with_constant(ConstantTerminal::new(CONSTANT_RANGE.0, CONSTANT_RANGE.1))
        .with_functions(&[
            Function::Add,
            Function::Subtract,
            Function::Multiply,
            Function::Divide,
        ])
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<RegressionData> {
    RegressionConnector::load(path)
}

pub fn build_regression_oracle(inputs: Vec<f64>, outputs: Vec<f64>) -> Result<RegressionOracle> {
    RegressionOracle::new(inputs, outputs)
}

/// Fit a formula to the (input, expected) pairs of the configured file
pub fn run<C: ProgressCallback>(config: &RegressionConfig, callback: &mut C) -> Result<RunReport> {
    let data = load(&config.training_path)?;
    let oracle = build_regression_oracle(data.inputs, data.outputs)?;

    let mut engine = EvolutionEngine::new(config.evolution.clone(), node_set())?;
    let population = engine.initialize_population(config.evolution.population_size);
    let evolved = engine.evolve(population, &oracle, config.evolution.num_generations, callback)?;

    let report = RunReport::from_run("regression", &evolved, engine.get_hall_of_fame())?;
    log::info!(
        "Best program: {} (total error {})",
        report.best_formula,
        report.best_fitness
    );
    Ok(report)
}
