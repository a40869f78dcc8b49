//! Host dependency contexts
//!
//! A dependency context lists every component linked into the host. The
//! resolver attaches each of them to the entry part.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::DiscoveryConfig;
use crate::part::traits::{Component, DependencyContext, PartError};

/// Dependency manifest (`<entry>.deps.json` structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    /// Names of linked components
    #[serde(default)]
    pub components: Vec<String>,
}

impl DependencyManifest {
    /// Load a dependency manifest from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PartError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PartError::InvalidManifest(format!("Failed to read dependency manifest: {}", e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Links nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDependencies;

impl DependencyContext for NoDependencies {
    fn resolve_components(&self, _entry: &Component) -> Result<Vec<String>, PartError> {
        Ok(Vec::new())
    }
}

/// Links a fixed list of components
#[derive(Debug, Clone, Default)]
pub struct StaticDependencyContext {
    components: Vec<String>,
}

impl StaticDependencyContext {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }
}

impl DependencyContext for StaticDependencyContext {
    fn resolve_components(&self, _entry: &Component) -> Result<Vec<String>, PartError> {
        Ok(self.components.clone())
    }
}

/// Reads `<entry><deps_extension>` next to the entry component's manifest
///
/// An entry without a storage location, or without a dependency manifest,
/// links nothing.
#[derive(Debug, Clone)]
pub struct DepsFileContext {
    deps_extension: String,
}

impl DepsFileContext {
    pub fn new() -> Self {
        Self::with_config(&DiscoveryConfig::default())
    }

    pub fn with_config(config: &DiscoveryConfig) -> Self {
        Self {
            deps_extension: config.deps_extension.clone(),
        }
    }

    /// Dependency manifest path for `entry`, if it has a location
    pub fn deps_path(&self, entry: &Component) -> Option<PathBuf> {
        let directory = entry.location()?.parent()?;
        Some(directory.join(format!("{}{}", entry.name(), self.deps_extension)))
    }
}

impl Default for DepsFileContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyContext for DepsFileContext {
    fn resolve_components(&self, entry: &Component) -> Result<Vec<String>, PartError> {
        let Some(path) = self.deps_path(entry) else {
            debug!("Entry {} has no location, no dependency manifest", entry.name());
            return Ok(Vec::new());
        };

        if !path.is_file() {
            debug!("No dependency manifest at {:?}", path);
            return Ok(Vec::new());
        }

        Ok(DependencyManifest::from_file(&path)?.components)
    }
}
