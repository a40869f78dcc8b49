//! Component discovery
//!
//! Component loaders backed by a parts directory and by memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::part::registry::manifest::PartManifest;
use crate::part::traits::{Component, ComponentId, ComponentLoader, PartError};
use crate::part::validation::{ManifestValidator, ValidationResult};

/// Loads components from `<name><extension>` manifests in a parts directory
///
/// A component's identity is the canonical path of its manifest, so the same
/// file loaded by name and by path is the same part.
pub struct DirectoryComponentLoader {
    /// Directory holding part manifests
    parts_dir: PathBuf,
    /// Manifest file extension, including the leading dot
    component_extension: String,
    validator: ManifestValidator,
}

impl DirectoryComponentLoader {
    /// Create a loader for `parts_dir` with the default extension
    pub fn new<P: AsRef<Path>>(parts_dir: P) -> Self {
        Self::with_config(parts_dir, &DiscoveryConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(parts_dir: P, config: &DiscoveryConfig) -> Self {
        Self {
            parts_dir: parts_dir.as_ref().to_path_buf(),
            component_extension: config.component_extension.clone(),
            validator: ManifestValidator::new(),
        }
    }

    pub fn parts_dir(&self) -> &Path {
        &self.parts_dir
    }

    /// Manifest path for a component name
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.parts_dir
            .join(format!("{}{}", name, self.component_extension))
    }

    /// Discover all components in the parts directory
    ///
    /// Unparseable manifests are skipped with a warning. Results are sorted
    /// by name so discovery does not depend on directory enumeration order.
    pub fn discover_parts(&self) -> Result<Vec<Arc<Component>>, PartError> {
        info!("Discovering parts in {:?}", self.parts_dir);

        if !self.parts_dir.exists() {
            debug!("Parts directory does not exist: {:?}", self.parts_dir);
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.parts_dir).map_err(|e| {
            PartError::Io(format!("Failed to read parts directory: {}", e))
        })?;

        let mut parts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                PartError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            let is_manifest = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.ends_with(&self.component_extension));
            if !path.is_file() || !is_manifest {
                continue;
            }

            match self.load_file(&path) {
                Ok(component) => parts.push(component),
                Err(e) => {
                    warn!("Failed to load part manifest {:?}: {}", path, e);
                    continue;
                }
            }
        }

        parts.sort_by(|a, b| a.name().cmp(b.name()));
        info!("Discovered {} parts", parts.len());
        Ok(parts)
    }

    fn load_file(&self, path: &Path) -> Result<Arc<Component>, PartError> {
        let display = path.display().to_string();
        let canonical = path
            .canonicalize()
            .map_err(|e| PartError::load(&display, e))?;
        let manifest = PartManifest::from_file(&canonical).map_err(|e| PartError::load(&display, e))?;

        match self.validator.validate(&manifest) {
            ValidationResult::Valid => {
                debug!("Manifest validated for part: {}", manifest.name);
            }
            ValidationResult::Invalid(errors) => {
                // Loading continues; the resolver only needs names.
                warn!("Manifest validation failed for part {}: {:?}", manifest.name, errors);
            }
        }

        let id = ComponentId::new(canonical.to_string_lossy());
        let name = manifest.name.clone();
        Ok(Arc::new(Component::new(id, name, Some(canonical), manifest)))
    }
}

impl ComponentLoader for DirectoryComponentLoader {
    fn load(&self, name: &str) -> Result<Arc<Component>, PartError> {
        let path = self.manifest_path(name);
        if !path.is_file() {
            return Err(PartError::load(
                name,
                format!("no manifest at {}", path.display()),
            ));
        }

        let component = self.load_file(&path).map_err(|e| match e {
            PartError::Load { reason, .. } => PartError::Load {
                name: name.to_string(),
                reason,
            },
            other => other,
        })?;

        if component.name() != name {
            return Err(PartError::load(
                name,
                format!("manifest {} declares name {}", path.display(), component.name()),
            ));
        }

        Ok(component)
    }

    fn load_from_path(&self, path: &Path) -> Result<Arc<Component>, PartError> {
        self.load_file(path)
    }
}

/// Components synthesized in memory
///
/// Components have no storage location, so companion probing never finds
/// anything for them. Identity is the component name.
#[derive(Debug, Default)]
pub struct InMemoryComponentLoader {
    components: HashMap<String, Arc<Component>>,
}

impl InMemoryComponentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component built from `manifest`, replacing any previous one
    pub fn register(&mut self, manifest: PartManifest) -> Arc<Component> {
        let name = manifest.name.clone();
        let component = Arc::new(Component::new(
            ComponentId::new(&name),
            name.clone(),
            None,
            manifest,
        ));
        self.components.insert(name, Arc::clone(&component));
        component
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentLoader for InMemoryComponentLoader {
    fn load(&self, name: &str) -> Result<Arc<Component>, PartError> {
        self.components
            .get(name)
            .cloned()
            .ok_or_else(|| PartError::load(name, "not registered"))
    }

    fn load_from_path(&self, path: &Path) -> Result<Arc<Component>, PartError> {
        Err(PartError::load(
            path.display().to_string(),
            "in-memory components have no storage location",
        ))
    }

    fn exists(&self, _path: &Path) -> bool {
        false
    }
}
