//! Part manifest parsing
//!
//! Handles parsing `<name>.part.toml` manifests. A manifest is the typed
//! declared metadata of a component: the additional parts it pulls in, its
//! configure overrides and, for compiled resource bundles, the compiled items
//! and resource declarations it carries.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::part::features::merge::Keyed;
use crate::part::traits::PartError;

/// Slot used when the host does not ask for a specific configure slot
pub const DEFAULT_SLOT: &str = "Default";

/// Part manifest (`<name>.part.toml` structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartManifest {
    /// Component name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Names of components this part pulls in as additional parts
    #[serde(default)]
    pub additional_parts: Vec<String>,
    /// Configure operation overrides
    #[serde(default)]
    pub configure: Vec<ConfigureDeclaration>,
    /// Compiled resource items carried by the component
    #[serde(default)]
    pub items: Vec<CompiledItem>,
    /// Resource declarations carried by the component
    #[serde(default)]
    pub resources: Vec<ResourceDeclaration>,
}

/// Configure operation override declared by a part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureDeclaration {
    /// Operation token, looked up in the operation registry
    pub operation: String,
    /// Slot the override applies to
    #[serde(default = "default_slot")]
    pub slot: String,
}

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

impl ConfigureDeclaration {
    pub fn new(operation: impl Into<String>) -> Self {
        Self::with_slot(operation, DEFAULT_SLOT)
    }

    pub fn with_slot(operation: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            slot: slot.into(),
        }
    }
}

/// Compiled resource item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledItem {
    /// Logical resource identifier (a relative path)
    pub identifier: String,
    /// Item kind
    #[serde(default)]
    pub kind: String,
    /// Name of the compiled type backing the item
    pub type_name: String,
}

impl Keyed for CompiledItem {
    fn key(&self) -> &str {
        &self.identifier
    }
}

/// Resource declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeclaration {
    /// Logical resource path
    pub path: String,
    /// Name of the compiled type backing the resource
    pub type_name: String,
}

impl Keyed for ResourceDeclaration {
    fn key(&self) -> &str {
        &self.path
    }
}

impl PartManifest {
    /// Manifest with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a manifest from TOML
    pub fn from_toml_str(contents: &str) -> Result<Self, PartError> {
        let manifest: PartManifest = toml::from_str(contents).map_err(|e| {
            PartError::InvalidManifest(format!("Failed to parse manifest TOML: {}", e))
        })?;

        if manifest.name.is_empty() {
            return Err(PartError::InvalidManifest(
                "Part name cannot be empty".to_string(),
            ));
        }

        Ok(manifest)
    }

    /// Load manifest from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PartError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PartError::InvalidManifest(format!("Failed to read manifest file: {}", e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, PartError> {
        toml::to_string_pretty(self).map_err(|e| {
            PartError::InvalidManifest(format!("Failed to serialize manifest: {}", e))
        })
    }

    /// Whether the part declares any configure override
    pub fn has_configure_overrides(&self) -> bool {
        !self.configure.is_empty()
    }

    /// First configure declaration for `slot` (ordinal comparison)
    pub fn configure_for_slot(&self, slot: &str) -> Option<&ConfigureDeclaration> {
        self.configure.iter().find(|c| c.slot == slot)
    }
}
