use super::context::ExecutionContext;
use crate::engines::generation::program::Program;
use crate::error::Result;
use crate::types::OptimizationDirection;

/// Maps a candidate program to a single comparable score
///
/// `Ok(NaN)` (or any other sentinel an oracle documents) means "reject this
/// candidate" and is absorbed by the search like any other score. `Err` is
/// reserved for failures that point at a broken node set and must stop the run.
pub trait FitnessFunction: Send + Sync {
    /// Score `program`, using `context` as scratch space for variable bindings
    fn evaluate(&self, program: &Program, context: &mut ExecutionContext) -> Result<f64>;

    /// Which way is better for this oracle's scores
    fn direction(&self) -> OptimizationDirection;

    /// Number of context slots this oracle binds
    fn num_variables(&self) -> usize;

    fn name(&self) -> &'static str;
}
