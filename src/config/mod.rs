//! Configuration management for part-composer
//!
//! Handles configuration loading for part discovery and logging.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::part::model::COMPANION_SUFFIXES;

/// Part discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Companion suffixes probed after a component name, most specific first
    #[serde(default = "default_companion_suffixes")]
    pub companion_suffixes: Vec<String>,

    /// Extension of part manifest files
    #[serde(default = "default_component_extension")]
    pub component_extension: String,

    /// Extension of the entry point's dependency manifest
    #[serde(default = "default_deps_extension")]
    pub deps_extension: String,
}

fn default_companion_suffixes() -> Vec<String> {
    COMPANION_SUFFIXES.iter().map(|s| s.to_string()).collect()
}

fn default_component_extension() -> String {
    ".part.toml".to_string()
}

fn default_deps_extension() -> String {
    ".deps.json".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            companion_suffixes: default_companion_suffixes(),
            component_extension: default_component_extension(),
            deps_extension: default_deps_extension(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "part_composer::part=debug"); RUST_LOG takes precedence
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON logs (requires the `json-logging` feature)
    #[serde(default)]
    pub json_format: bool,
}

/// Composer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Directory holding part manifests
    #[serde(default = "default_parts_dir")]
    pub parts_dir: PathBuf,

    /// Name of the entry component
    pub entry_point: String,

    /// Part discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

fn default_parts_dir() -> PathBuf {
    PathBuf::from("parts")
}

impl ComposerConfig {
    /// Configuration for `entry_point` with defaults elsewhere
    pub fn new(entry_point: impl Into<String>) -> Self {
        Self {
            parts_dir: default_parts_dir(),
            entry_point: entry_point.into(),
            discovery: DiscoveryConfig::default(),
            logging: None,
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ComposerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
