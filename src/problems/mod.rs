//! Problem definitions: the node set each problem searches over and a
//! `run` helper that drives one complete experiment from configuration.

pub mod classification;
pub mod regression;
mod report;

pub use report::RunReport;
