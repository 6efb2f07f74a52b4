use crate::data::record::Record;
use crate::types::Diagnosis;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default fraction of each class assigned to the training set
pub const DEFAULT_SPLIT_RATIO: f64 = 0.8;

/// Training set + test set
#[derive(Debug, Clone)]
pub struct DataSplit {
    pub training: Vec<Record>,
    pub test: Vec<Record>,
}

impl DataSplit {
    /// Per-class train/test counts
    pub fn summary(&self) -> SplitSummary {
        let mut classes: BTreeMap<Diagnosis, ClassCounts> = BTreeMap::new();
        for record in &self.training {
            classes.entry(record.label()).or_default().training += 1;
        }
        for record in &self.test {
            classes.entry(record.label()).or_default().test += 1;
        }
        SplitSummary { classes }
    }
}

/// Configuration for data splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    pub training_ratio: f64, // e.g., 0.8 = 80% of every class trains
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            training_ratio: DEFAULT_SPLIT_RATIO,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub training: usize,
    pub test: usize,
}

impl ClassCounts {
    pub fn total(&self) -> usize {
        self.training + self.test
    }

    pub fn training_fraction(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.training as f64 / self.total() as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub classes: BTreeMap<Diagnosis, ClassCounts>,
}
