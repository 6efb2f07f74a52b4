use super::context::ExecutionContext;
use super::fitness::FitnessFunction;
use crate::engines::generation::program::Program;
use crate::error::{Result, SymgpError};
use crate::types::OptimizationDirection;

/// Total errors below this count as a perfect fit
pub const PERFECT_FIT_TOLERANCE: f64 = 0.001;

/// Returned instead of an infinite error so bad candidates stay ordered
pub const WORST_ERROR: f64 = f64::MAX;

/// Sum of absolute errors over (input, expected) pairs; lower is better
#[derive(Debug)]
pub struct RegressionOracle {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl RegressionOracle {
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>) -> Result<Self> {
        if inputs.is_empty() {
            return Err(SymgpError::Validation(
                "Regression needs at least one sample".to_string(),
            ));
        }
        if inputs.len() != outputs.len() {
            return Err(SymgpError::Validation(format!(
                "{} inputs but {} expected outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        Ok(Self { inputs, outputs })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl FitnessFunction for RegressionOracle {
    fn evaluate(&self, program: &Program, context: &mut ExecutionContext) -> Result<f64> {
        if context.len() != 1 {
            return Err(SymgpError::Configuration(format!(
                "regression needs a 1-slot context, got {}",
                context.len()
            )));
        }

        let mut error = 0.0f64;
        for (&input, &expected) in self.inputs.iter().zip(&self.outputs) {
            context.set(0, input)?;

            let result = program.execute(context).map_err(|e| {
                // Illegal operation: the node set is broken, not the candidate
                log::error!("x = {}: {} failed: {}", input, program, e);
                e
            })?;

            error += (result - expected).abs();
            if error.is_infinite() {
                return Ok(WORST_ERROR);
            }
        }

        if error < PERFECT_FIT_TOLERANCE {
            error = 0.0;
        }
        Ok(error)
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Minimize
    }

    fn num_variables(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "regression_abs_error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::program::{Function, Node};

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(["X"])
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(RegressionOracle::new(vec![1.0, 2.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert!(matches!(
            RegressionOracle::new(Vec::new(), Vec::new()),
            Err(SymgpError::Validation(_))
        ));
    }

    #[test]
    fn test_absolute_error_sum() {
        let oracle = RegressionOracle::new(vec![1.0, 2.0], vec![3.0, -1.0]).unwrap();
        let program = Program::new(Node::variable(0, "X"));
        // |1 - 3| + |2 - (-1)|
        assert_eq!(oracle.evaluate(&program, &mut ctx()).unwrap(), 5.0);
    }

    #[test]
    fn test_small_error_snaps_to_zero() {
        let oracle = RegressionOracle::new(vec![1.0], vec![1.0005]).unwrap();
        let program = Program::new(Node::variable(0, "X"));
        assert_eq!(oracle.evaluate(&program, &mut ctx()).unwrap(), 0.0);
    }

    #[test]
    fn test_error_at_tolerance_is_kept() {
        let oracle = RegressionOracle::new(vec![0.0], vec![0.5]).unwrap();
        let program = Program::new(Node::Constant(0.0));
        assert_eq!(oracle.evaluate(&program, &mut ctx()).unwrap(), 0.5);
    }

    #[test]
    fn test_wrong_context_rejected() {
        let oracle = RegressionOracle::new(vec![1.0], vec![1.0]).unwrap();
        let program = Program::new(Node::Constant(1.0));
        let mut two = ExecutionContext::new(["X", "Y"]);
        assert!(oracle.evaluate(&program, &mut two).is_err());
    }

    #[test]
    fn test_nan_result_is_returned_not_raised() {
        let oracle = RegressionOracle::new(vec![1.0], vec![1.0]).unwrap();
        let inf = Node::call(Function::Exp, vec![Node::Constant(1e4)]);
        let program = Program::new(Node::call(Function::Subtract, vec![inf.clone(), inf]));
        assert!(oracle.evaluate(&program, &mut ctx()).unwrap().is_nan());
    }
}
