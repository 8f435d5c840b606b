//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote model endpoint.
///
/// Generation parameters are fixed by the client and are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

/// Where the status record, credential and logs live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".vocab-helper"))
        .unwrap_or_else(|| PathBuf::from(".vocab-helper"))
}

impl StorageConfig {
    /// Data directory with `~` expanded.
    pub fn resolved_data_dir(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.data_dir.to_string_lossy()))
    }

    pub fn status_path(&self) -> PathBuf {
        self.resolved_data_dir().join("status.json")
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.resolved_data_dir().join("credentials.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.resolved_data_dir().join("logs")
    }
}

/// Request orchestration behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Drop a completion when a newer request has started since.
    ///
    /// Off by default: the last write to the status store wins.
    #[serde(default)]
    pub discard_stale_results: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Also write daily-rotated log files under the data directory.
    #[serde(default = "default_file")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_file(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for the subscriber; a blank level means `info`.
    pub fn filter_directive(&self) -> &str {
        match self.level.trim() {
            "" => "info",
            level => level,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file() -> bool {
    true
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
