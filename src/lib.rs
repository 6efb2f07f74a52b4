pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod problems;
pub mod types;

pub use error::{Result, SymgpError};
pub use types::{Diagnosis, OptimizationDirection};
