//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/polyfold/polyfold.toml`
//! 3. Environment variables: `POLYFOLD_*` prefix, `__` between section and key
//!    (e.g. `POLYFOLD_TAX__RATE_BPS=3500`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Rate;

pub const ENV_PREFIX: &str = "POLYFOLD";

/// Deeper trees are refused before folding.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Tax computation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TaxConfig {
    /// Rate of the default strategy in basis points (4000 = 40%)
    pub rate_bps: u32,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            rate_bps: Rate::DEFAULT.bps(),
        }
    }
}

/// Tree folding settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tax: RawTaxConfig,
    pub tree: RawTreeConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTaxConfig {
    pub rate_bps: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub max_depth: Option<usize>,
}

/// Unified configuration for polyfold.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub tax: TaxConfig,
    pub tree: TreeConfig,
}

/// Get the XDG config directory for polyfold.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "polyfold").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("polyfold.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Environment source used by [`Settings::load`].
    pub fn env_source() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    /// Load settings from defaults, the global config file and `POLYFOLD_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_layers(global.as_deref(), Self::env_source())
    }

    /// Load settings from defaults, an optional config file and an environment source.
    pub fn load_layers(file: Option<&Path>, env: Environment) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file overrides whatever it specifies
        if let Some(path) = file {
            debug!("load_layers: reading {}", path.display());
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 3. Environment variables replace
        current = Self::apply_env_overrides(current, env)?;

        current.validate()?;
        Ok(current)
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tax: TaxConfig {
                rate_bps: overlay.tax.rate_bps.unwrap_or(self.tax.rate_bps),
            },
            tree: TreeConfig {
                max_depth: overlay.tree.max_depth.unwrap_or(self.tree.max_depth),
            },
        }
    }

    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        match config.get::<u32>("tax.rate_bps") {
            Ok(val) => settings.tax.rate_bps = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get::<usize>("tree.max_depth") {
            Ok(val) => settings.tree.max_depth = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        Rate::from_bps(self.tax.rate_bps).map_err(|e| ApplicationError::Config {
            message: format!("tax.rate_bps: {}", e),
        })?;
        if self.tree.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "tree.max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tax.rate_bps, 4_000);
        assert_eq!(settings.tree.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let raw: RawSettings = toml::from_str("[tree]\nmax_depth = 12\n").unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.tree.max_depth, 12);
        assert_eq!(merged.tax.rate_bps, 4_000);
    }
}
