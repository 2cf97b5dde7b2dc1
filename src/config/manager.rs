use super::{
    prediction::{ImputationConfig, PredictionConfig},
    split::SplitConfig,
    traits::ConfigSection,
};
use crate::error::{PanelSplitError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment prefix for overrides, e.g. `PANELSPLIT__SPLIT__N_SPLITS=3`
pub const ENV_PREFIX: &str = "PANELSPLIT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub split: SplitConfig,
    pub prediction: PredictionConfig,
    pub imputation: ImputationConfig,
}

impl PanelConfig {
    pub fn validate(&self) -> Result<()> {
        self.split.validate()?;
        self.prediction.validate()?;
        self.imputation.validate()?;
        Ok(())
    }

    /// Parse a TOML document without environment overrides
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: PanelConfig = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<PanelConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(PanelConfig::default())),
        }
    }

    /// Load a TOML file, layering `PANELSPLIT__*` environment variables on top
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PanelSplitError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let config: PanelConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| PanelSplitError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| PanelSplitError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> PanelConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to a copy and keep it only if the result validates
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut PanelConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
