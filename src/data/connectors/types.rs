use crate::data::record::Record;
use crate::types::{Diagnosis, MISSING_FEATURE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names of the nine measurements, in record order
pub const FEATURE_NAMES: [&str; 9] = [
    "clump_thickness",
    "uniformity_of_cell_size",
    "uniformity_of_cell_shape",
    "marginal_adhesion",
    "single_epithelial_cell_size",
    "bare_nuclei",
    "bland_chromatin",
    "normal_nucleoli",
    "mitoses",
];

/// Metadata about a loaded diagnosis dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub num_records: usize,
    pub num_benign: usize,
    pub num_malignant: usize,
    pub records_with_missing: usize,
}

impl DatasetMetadata {
    pub fn from_records<P: AsRef<Path>>(path: P, records: &[Record]) -> Self {
        let num_benign = records.iter().filter(|r| r.label() == Diagnosis::Benign).count();
        let records_with_missing = records
            .iter()
            .filter(|r| r.features().contains(&MISSING_FEATURE))
            .count();

        Self {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_records: records.len(),
            num_benign,
            num_malignant: records.len() - num_benign,
            records_with_missing,
        }
    }
}

/// Parsed regression training data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionData {
    pub inputs: Vec<f64>,
    pub outputs: Vec<f64>,
}

impl RegressionData {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
