//! Part system traits and interfaces
//!
//! Defines the component type, the collaborators the resolver talks to and the
//! error taxonomy shared by the whole part system.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::part::registry::manifest::PartManifest;

/// Opaque identity of a loaded component
///
/// Assigned by the [`ComponentLoader`] that produced the component. Two
/// components are the same part iff their identities are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(Arc<str>);

impl ComponentId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A loaded component with its declared metadata
#[derive(Debug, Clone)]
pub struct Component {
    id: ComponentId,
    name: String,
    location: Option<PathBuf>,
    manifest: PartManifest,
}

impl Component {
    /// Create a component
    ///
    /// `location` is the file the component was loaded from. Components
    /// synthesized in memory have no location, which disables companion
    /// probing for them.
    pub fn new(
        id: ComponentId,
        name: impl Into<String>,
        location: Option<PathBuf>,
        manifest: PartManifest,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            manifest,
        }
    }

    /// Component identity
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage location, if the component was loaded from disk
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Declared metadata
    pub fn manifest(&self) -> &PartManifest {
        &self.manifest
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Component {}

/// Component loader used by the resolver
///
/// Loading by name is used for the entry point, for declared additional parts
/// and for components listed by a [`DependencyContext`]. Loading by path is
/// only used for probed companion parts.
pub trait ComponentLoader {
    /// Load a component by name
    fn load(&self, name: &str) -> Result<Arc<Component>, PartError>;

    /// Load a component from a storage location
    fn load_from_path(&self, path: &Path) -> Result<Arc<Component>, PartError>;

    /// Check whether a storage location holds something loadable
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Source of the flat list of components linked into the host
pub trait DependencyContext {
    /// Names of every component the host links, possibly including the entry
    fn resolve_components(&self, entry: &Component) -> Result<Vec<String>, PartError>;
}

/// Part system errors
#[derive(Debug, Error)]
pub enum PartError {
    #[error("Cycle detected while resolving part {name}: {}", path.join(" -> "))]
    Cycle { name: String, path: Vec<String> },

    #[error("Failed to load component {name}: {reason}")]
    Load { name: String, reason: String },

    #[error(
        "Operation {operation} specified in configure[slot={slot}] of part {part} is not a registered configure operation"
    )]
    ConfigurationType {
        part: String,
        slot: String,
        operation: String,
    },

    #[error("Invalid part manifest: {0}")]
    InvalidManifest(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl PartError {
    pub(crate) fn load(name: impl Into<String>, reason: impl fmt::Display) -> Self {
        PartError::Load {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<std::io::Error> for PartError {
    fn from(e: std::io::Error) -> Self {
        PartError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PartError {
    fn from(e: serde_json::Error) -> Self {
        PartError::InvalidManifest(e.to_string())
    }
}

impl From<toml::de::Error> for PartError {
    fn from(e: toml::de::Error) -> Self {
        PartError::InvalidManifest(e.to_string())
    }
}
