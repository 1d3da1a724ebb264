//! Persistent analytics configuration
//!
//! Stores the bucket limit and output unit in a JSON file at
//! `<config_dir>/confstats/config.json`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_max_buckets() -> usize {
    confstats_core::DEFAULT_MAX_BUCKETS
}

/// Unit used when reporting bucket durations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Millis,
    Seconds,
}

/// Persistent analytics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maximum number of buckets a single query may request
    #[serde(default = "default_max_buckets")]
    pub max_buckets: usize,
    /// Unit for reported durations
    #[serde(default)]
    pub unit: DurationUnit,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_buckets: default_max_buckets(),
            unit: DurationUnit::default(),
        }
    }
}

impl AppConfig {
    /// Config file path: `<config_dir>/confstats/config.json`
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("confstats")
            .join("config.json")
    }

    /// Load config from the default path, falling back to defaults on any error
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded config from disk");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from an explicit path, failing if it is missing or malformed
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded config from disk");
        Ok(config)
    }

    /// Save config to disk, creating parent directories if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Config saved to disk");
        Ok(())
    }
}
