pub mod base;
pub mod stratified;
pub mod types;
pub mod writer;

pub use base::DataSplitter;
pub use stratified::StratifiedSplitter;
pub use types::{ClassCounts, DataSplit, SplitConfig, SplitSummary, DEFAULT_SPLIT_RATIO};
pub use writer::SplitWriter;
