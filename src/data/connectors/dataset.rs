use crate::data::record::Record;
use crate::error::{Result, SymgpError};
use crate::types::{MISSING_FEATURE, NUM_FEATURES};
use polars::prelude::*;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use super::{types::DatasetMetadata, validator::DataValidator};

/// id, nine features, label
const NUM_COLUMNS: usize = NUM_FEATURES + 2;

/// Token standing for a missing measurement
const MISSING_TOKEN: &str = "?";

pub struct DatasetConnector;

impl DatasetConnector {
    /// Load the diagnosis dataset, one record per line, in file order
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
        let bytes = std::fs::read(&path).map_err(|e| SymgpError::resource(&path, e))?;
        let records = Self::parse(&bytes)?;

        log::info!(
            "Loaded {} records from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(records)
    }

    /// Parse records from any byte source. The first malformed line aborts
    /// the whole load.
    pub fn load_from_reader<R: Read>(mut reader: R) -> Result<Vec<Record>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse(&bytes)
    }

    fn parse(bytes: &[u8]) -> Result<Vec<Record>> {
        // Blank lines are dropped up front; remember where the rest came from
        let mut line_numbers = Vec::new();
        let mut content = Vec::with_capacity(bytes.len());
        for (idx, line) in bytes.split(|&b| b == b'\n').enumerate() {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            line_numbers.push(idx + 1);
            content.extend_from_slice(line);
            content.push(b'\n');
        }
        if line_numbers.is_empty() {
            return Ok(Vec::new());
        }

        let df = Self::read_frame(content)?;
        let columns = (1..=NUM_COLUMNS)
            .map(|i| df.column(&column_name(i))?.i64().cloned())
            .collect::<PolarsResult<Vec<Int64Chunked>>>()?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let line = line_numbers.get(row).copied().unwrap_or(row + 1);
            let record = Self::record_from_row(&columns, row).map_err(|e| match e {
                SymgpError::Validation(msg) => {
                    SymgpError::Validation(format!("line {}: {}", line, msg))
                }
                other => other,
            })?;
            records.push(record);
        }

        Ok(records)
    }

    fn read_frame(content: Vec<u8>) -> Result<DataFrame> {
        let schema: Schema = (1..=NUM_COLUMNS)
            .map(|i| Field::new(column_name(i).into(), DataType::Int64))
            .collect();

        CsvReadOptions::default()
            .with_has_header(false)
            .with_schema(Some(Arc::new(schema)))
            .map_parse_options(|opts| {
                opts.with_null_values(Some(NullValues::AllColumnsSingle(MISSING_TOKEN.into())))
            })
            .into_reader_with_file_handle(Cursor::new(content))
            .finish()
            .map_err(|e| SymgpError::Validation(format!("Failed to read dataset: {}", e)))
    }

    fn record_from_row(columns: &[Int64Chunked], row: usize) -> Result<Record> {
        let id = columns[0]
            .get(row)
            .ok_or_else(|| SymgpError::Validation("Missing record id".to_string()))?;
        let label = columns[NUM_COLUMNS - 1]
            .get(row)
            .ok_or_else(|| SymgpError::Validation("Missing label".to_string()))?;

        let features: Vec<i32> = columns[1..NUM_COLUMNS - 1]
            .iter()
            .map(|column| column.get(row).map_or(MISSING_FEATURE, narrow))
            .collect();

        Record::new(id, &features, narrow(label))
    }

    /// Load and sanity-check the dataset
    pub fn load_and_validate<P: AsRef<Path>>(
        path: P,
        min_records: Option<usize>,
    ) -> Result<(Vec<Record>, DatasetMetadata)> {
        let records = Self::load(&path)?;

        DataValidator::validate_minimum_records(&records, min_records.unwrap_or(1))?;
        DataValidator::validate_both_classes(&records)?;

        // Warn about missing measurements but don't fail
        let missing = DataValidator::check_missing(&records);
        if !missing.is_empty() {
            log::warn!("Missing measurements detected (feature, count): {:?}", missing);
        }

        let metadata = DatasetMetadata::from_records(path, &records);
        Ok((records, metadata))
    }
}

fn column_name(index: usize) -> String {
    format!("column_{}", index)
}

// Out-of-range values must still fail record validation, not wrap
fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
