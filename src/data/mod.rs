pub mod connectors;
pub mod record;
pub mod splitters;

pub use connectors::{DatasetConnector, DatasetMetadata, RegressionConnector, RegressionData};
pub use record::Record;
pub use splitters::{DataSplit, DataSplitter, SplitWriter, StratifiedSplitter};
