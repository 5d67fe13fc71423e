//! Configuration file management.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use agrotwin_core::{EngineConfig, RecommendationEngine, ThresholdSet, ThresholdTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default output format ("text" or "json")
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Recommendation engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Custom threshold sets by crop name, overriding or extending the built-ins
    #[serde(default)]
    pub thresholds: BTreeMap<String, ThresholdSet>,

    /// Watch command settings
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Watch command configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between evaluations
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

fn default_interval() -> u64 {
    10
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agrotwin")
            .join("config.toml")
    }

    /// Resolve the config path: explicit override, otherwise the default location
    pub fn path(override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path)
    }

    /// Load config from file, or return default if missing or unreadable
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Built-in thresholds with this config's custom sets applied
    pub fn threshold_table(&self) -> Result<ThresholdTable> {
        let table = ThresholdTable::builtin()
            .with_overrides(self.thresholds.iter().map(|(name, set)| (name, *set)))
            .context("Invalid [thresholds] in config")?;
        Ok(table)
    }

    /// Recommendation engine configured from this file
    pub fn engine(&self) -> Result<RecommendationEngine> {
        let engine = RecommendationEngine::new(self.threshold_table()?, self.engine.clone())
            .context("Invalid [engine] in config")?;
        Ok(engine)
    }
}
