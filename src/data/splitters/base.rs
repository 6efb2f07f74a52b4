use super::types::*;
use crate::data::record::Record;
use crate::error::Result;

pub trait DataSplitter: Send + Sync {
    /// Partition records into a training set and a test set
    fn split(&self, records: &[Record]) -> Result<DataSplit>;

    /// Get splitter configuration
    fn config(&self) -> &SplitConfig;
}
