//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_RESOURCE_SEARCH_DIRS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily rolled file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Registered features required by every test class, by name
    #[serde(default)]
    pub features: Vec<String>,

    /// Test resource lookup
    #[serde(default)]
    pub resources: ResourceConfig,
}

/// Test resource lookup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Base directory; the package directory when unset
    pub base_dir: Option<PathBuf>,

    /// Directories searched below the base, in order
    pub search_dirs: Vec<String>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            search_dirs: DEFAULT_RESOURCE_SEARCH_DIRS
                .iter()
                .map(|dir| (*dir).to_string())
                .collect(),
        }
    }
}
