use super::types::DataSplit;
use crate::data::record::Record;
use crate::error::{Result, SymgpError};
use std::path::Path;

/// Persists a split to two plain-text files, one record per line, no header
pub struct SplitWriter;

impl SplitWriter {
    pub fn persist<P: AsRef<Path>, Q: AsRef<Path>>(
        split: &DataSplit,
        training_path: P,
        test_path: Q,
    ) -> Result<()> {
        Self::write_records(&split.training, training_path)?;
        Self::write_records(&split.test, test_path)?;
        Ok(())
    }

    pub fn write_records<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
        std::fs::write(&path, Self::render(records)).map_err(|e| SymgpError::resource(&path, e))?;
        log::info!("Wrote {} records to {}", records.len(), path.as_ref().display());
        Ok(())
    }

    pub fn render(records: &[Record]) -> String {
        records
            .iter()
            .map(Record::to_file_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
