use super::context::ExecutionContext;
use super::fitness::FitnessFunction;
use crate::data::record::Record;
use crate::engines::generation::program::Program;
use crate::error::{Result, SymgpError};
use crate::types::{Diagnosis, OptimizationDirection, NUM_FEATURES};

/// Confusion counts for the "malignant is positive" reading of a program.
/// True negatives play no part in F1 and are not tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfusionCounts {
    pub true_positive: f64,
    pub false_positive: f64,
    pub false_negative: f64,
}

impl ConfusionCounts {
    pub fn record(&mut self, predicted: Diagnosis, actual: Diagnosis) {
        match (predicted, actual) {
            (Diagnosis::Malignant, Diagnosis::Malignant) => self.true_positive += 1.0,
            (Diagnosis::Malignant, Diagnosis::Benign) => self.false_positive += 1.0,
            (Diagnosis::Benign, Diagnosis::Malignant) => self.false_negative += 1.0,
            (Diagnosis::Benign, Diagnosis::Benign) => {}
        }
    }

    /// TP / (TP + FP), or 0 when nothing was predicted positive
    pub fn precision(&self) -> f64 {
        safe_ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// TP / (TP + FN), or 0 when there were no positives
    pub fn recall(&self) -> f64 {
        safe_ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    /// F1 scaled to [0, 100]; 0 when precision and recall are both 0
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            return 0.0;
        }
        100.0 * (2.0 * precision * recall) / (precision + recall)
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// A non-negative program output reads as malignant
pub fn classify(output: f64) -> Diagnosis {
    if output >= 0.0 {
        Diagnosis::Malignant
    } else {
        Diagnosis::Benign
    }
}

/// F1-based oracle over a training set; higher is better
#[derive(Debug)]
pub struct ClassificationOracle {
    training_set: Vec<Record>,
}

impl ClassificationOracle {
    pub fn new(training_set: Vec<Record>) -> Self {
        Self { training_set }
    }

    pub fn training_set(&self) -> &[Record] {
        &self.training_set
    }

    /// Fraction of `records` whose sign-threshold prediction matches the label.
    /// A NaN output reads as a benign prediction.
    pub fn accuracy(
        program: &Program,
        records: &[Record],
        context: &mut ExecutionContext,
    ) -> Result<f64> {
        check_context(context)?;
        if records.is_empty() {
            return Ok(0.0);
        }

        let mut correct = 0usize;
        for record in records {
            bind_record(context, record)?;
            let output = program.execute(context)?;
            if classify(output) == record.label() {
                correct += 1;
            }
        }
        Ok(correct as f64 / records.len() as f64)
    }
}

impl FitnessFunction for ClassificationOracle {
    fn evaluate(&self, program: &Program, context: &mut ExecutionContext) -> Result<f64> {
        check_context(context)?;
        let mut counts = ConfusionCounts::default();

        for record in &self.training_set {
            bind_record(context, record)?;
            let output = program.execute(context)?;

            // NaN programs are least favoured by selection; stop here
            if output.is_nan() {
                return Ok(output);
            }
            counts.record(classify(output), record.label());
        }

        Ok(counts.f1_score())
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Maximize
    }

    fn num_variables(&self) -> usize {
        NUM_FEATURES
    }

    fn name(&self) -> &'static str {
        "classification_f1"
    }
}

fn check_context(context: &ExecutionContext) -> Result<()> {
    if context.len() != NUM_FEATURES {
        return Err(SymgpError::Configuration(format!(
            "classification needs a {}-slot context, got {}",
            NUM_FEATURES,
            context.len()
        )));
    }
    Ok(())
}

fn bind_record(context: &mut ExecutionContext, record: &Record) -> Result<()> {
    for (slot, &value) in record.features().iter().enumerate() {
        context.set(slot, value as f64)?;
    }
    Ok(())
}
