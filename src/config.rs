use std::path::Path;

use tracing::warn;

use crate::ai::LearnerConfig;
use crate::error::ConfigError;
use crate::training::trainer::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub learner: LearnerConfig,
    pub training: TrainerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.learner.alpha <= 0.0 || self.learner.alpha > 1.0 {
            return Err(ConfigError::Validation(
                "learner.alpha must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.learner.gamma) {
            return Err(ConfigError::Validation(
                "learner.gamma must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.learner.epsilon) {
            return Err(ConfigError::Validation(
                "learner.epsilon must be in [0, 1]".into(),
            ));
        }

        if self.training.scale == 0 {
            return Err(ConfigError::Validation(
                "training.scale must be > 0".into(),
            ));
        }
        if self.training.rounds == 0 {
            return Err(ConfigError::Validation(
                "training.rounds must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
    }
}
