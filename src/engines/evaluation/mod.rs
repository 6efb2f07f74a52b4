pub mod classification;
pub mod context;
pub mod executor;
pub mod fitness;
pub mod regression;

pub use classification::{classify, ClassificationOracle, ConfusionCounts};
pub use context::ExecutionContext;
pub use executor::Executor;
pub use fitness::FitnessFunction;
pub use regression::{RegressionOracle, PERFECT_FIT_TOLERANCE, WORST_ERROR};
