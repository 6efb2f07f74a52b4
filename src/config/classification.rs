use super::evolution::EvolutionConfig;
use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::data::splitters::DEFAULT_SPLIT_RATIO;
use crate::error::SymgpError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub dataset_path: PathBuf,
    pub training_output_path: PathBuf,
    pub test_output_path: PathBuf,
    pub split_ratio: f64,
    pub split_seed: Option<u64>,
    pub evolution: EvolutionConfig,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("breast-cancer-wisconsin.data"),
            training_output_path: PathBuf::from("training_set.data"),
            test_output_path: PathBuf::from("test_set.data"),
            split_ratio: DEFAULT_SPLIT_RATIO,
            split_seed: None,
            evolution: EvolutionConfig::default(),
        }
    }
}

impl ConfigSection for ClassificationConfig {
    fn section_name() -> &'static str {
        "classification"
    }

    fn validate(&self) -> Result<(), SymgpError> {
        if self.split_ratio <= 0.0 || self.split_ratio >= 1.0 {
            return Err(SymgpError::Configuration(
                "Split ratio must be between 0 and 1".to_string()
            ));
        }
        if self.training_output_path == self.test_output_path {
            return Err(SymgpError::Configuration(
                "Training and test output paths must differ".to_string()
            ));
        }
        self.evolution.validate()
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Classification".to_string(),
            fields: vec![
                FieldManifest::new(
                    "dataset_path",
                    "path",
                    serde_json::json!(self.dataset_path),
                    "Comma-separated diagnosis dataset",
                ),
                FieldManifest::new(
                    "split_ratio",
                    "float",
                    serde_json::json!(self.split_ratio),
                    "Fraction of each class used for training",
                )
                .with_range(0.0, 1.0),
                FieldManifest::new(
                    "split_seed",
                    "integer",
                    serde_json::json!(self.split_seed),
                    "Seed for the stratified shuffle; random when absent",
                ),
            ],
        }
    }
}
