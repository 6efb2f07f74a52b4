use super::evolution::EvolutionConfig;
use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::error::SymgpError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionConfig {
    #[serde(default = "default_training_path")]
    pub training_path: PathBuf,
    #[serde(default = "EvolutionConfig::regression_default")]
    pub evolution: EvolutionConfig,
}

fn default_training_path() -> PathBuf {
    PathBuf::from("regression.txt")
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            training_path: default_training_path(),
            evolution: EvolutionConfig::regression_default(),
        }
    }
}

impl ConfigSection for RegressionConfig {
    fn section_name() -> &'static str {
        "regression"
    }

    fn validate(&self) -> Result<(), SymgpError> {
        self.evolution.validate()
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Regression".to_string(),
            fields: vec![FieldManifest::new(
                "training_path",
                "path",
                serde_json::json!(self.training_path),
                "Two header lines, then whitespace-separated input/output pairs",
            )],
        }
    }
}
