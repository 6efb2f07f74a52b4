use super::{
    classification::ClassificationConfig,
    regression::RegressionConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::SymgpError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment variables with this prefix override file values,
/// e.g. `SYMGP__CLASSIFICATION__SPLIT_RATIO=0.7`
pub const ENV_PREFIX: &str = "SYMGP";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classification: ClassificationConfig,
    pub regression: RegressionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SymgpError> {
        self.classification.validate()?;
        self.regression.validate()?;
        Ok(())
    }

    /// Field descriptions of every section, with current values as defaults
    pub fn manifest(&self) -> Vec<ConfigManifest> {
        vec![
            self.classification.to_manifest(),
            self.classification.evolution.to_manifest(),
            self.regression.to_manifest(),
            self.regression.evolution.to_manifest(),
        ]
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Defaults, then the file. Sections and fields the file leaves out keep
    /// their defaults, the same way [`ConfigManager::load_layered`] fills them.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SymgpError> {
        let config = Self::build(Some(path.as_ref()), false)?;
        self.replace(config)
    }

    /// Defaults, then the optional file, then `SYMGP__*` environment overrides
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), SymgpError> {
        let path: Option<&Path> = path.as_ref().map(|p| p.as_ref());
        let config = Self::build(path, true)?;
        self.replace(config)
    }

    fn build(path: Option<&Path>, with_env: bool) -> Result<AppConfig, SymgpError> {
        let defaults = config::Config::try_from(&AppConfig::default())
            .map_err(|e| SymgpError::Configuration(format!("Failed to build defaults: {}", e)))?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            let contents =
                std::fs::read_to_string(path).map_err(|e| SymgpError::resource(path, e))?;
            builder = builder.add_source(config::File::from_str(&contents, config::FileFormat::Toml));
        }
        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        }

        builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| SymgpError::Configuration(format!("Failed to load config: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SymgpError> {
        let toml_str = toml::to_string_pretty(&self.get())
            .map_err(|e| SymgpError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(&path, toml_str).map_err(|e| SymgpError::resource(&path, e))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), SymgpError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), SymgpError> {
        config.validate()?;
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("symgp-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("round_trip.toml");
        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.classification.split_ratio = 0.75;
                c.regression.evolution.seed = Some(42);
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        assert_eq!(loaded.get(), manager.get());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "[classification]\nsplit_ratio = 0.7\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();
        assert_eq!(config.classification.split_ratio, 0.7);
        assert_eq!(config.regression, RegressionConfig::default());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_regression_evolution_keeps_regression_defaults() {
        let path = temp_path("partial_regression.toml");
        std::fs::write(&path, "[regression.evolution]\npopulation_size = 50\n").unwrap();

        let from_file = ConfigManager::new();
        from_file.load_from_file(&path).unwrap();
        let layered = ConfigManager::new();
        layered.load_layered(Some(&path)).unwrap();

        let evolution = from_file.get().regression.evolution;
        assert_eq!(evolution.population_size, 50);
        assert_eq!(evolution.num_generations, 500);
        assert_eq!(evolution.max_init_depth, 5);
        assert_eq!(evolution.max_crossover_depth, 10);
        assert_eq!(from_file.get().regression, layered.get().regression);
        assert_eq!(from_file.get().classification, ClassificationConfig::default());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_manifest_covers_every_section() {
        let sections: Vec<String> = AppConfig::default()
            .manifest()
            .into_iter()
            .map(|m| m.section)
            .collect();
        assert_eq!(sections, ["Classification", "Evolution", "Regression", "Evolution"]);
    }

    #[test]
    fn test_invalid_update_is_rejected_and_not_applied() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.classification.split_ratio = 1.5);
        assert!(result.is_err());
        assert_eq!(manager.get().classification.split_ratio, 0.8);
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let manager = ConfigManager::new();
        let err = manager.load_from_file(temp_path("nope.toml")).unwrap_err();
        assert!(matches!(err, SymgpError::Resource { .. }));
    }
}
