//! Test utilities for part system testing
//!
//! Provides a fixture that lays out part manifests in a temporary directory.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use part_composer::part::registry::manifest::{
    CompiledItem, ConfigureDeclaration, PartManifest, ResourceDeclaration,
};
use part_composer::part::registry::DependencyManifest;
use part_composer::ComposerConfig;

/// Test fixture for part system tests
pub struct PartTestFixture {
    /// Temporary directory for test data
    pub temp_dir: TempDir,
    /// Parts directory path
    pub parts_dir: PathBuf,
}

impl PartTestFixture {
    /// Create a new fixture with an empty parts directory
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let parts_dir = temp_dir.path().join("parts");
        std::fs::create_dir_all(&parts_dir)?;

        Ok(Self {
            temp_dir,
            parts_dir,
        })
    }

    /// Write a manifest to `<name>.part.toml`
    pub fn write_manifest(&self, manifest: &PartManifest) -> PathBuf {
        let path = self.parts_dir.join(format!("{}.part.toml", manifest.name));
        std::fs::write(&path, manifest.to_toml_string().unwrap()).unwrap();
        path
    }

    /// Write a part declaring `additional` parts
    pub fn write_part(&self, name: &str, additional: &[&str]) -> PathBuf {
        let mut manifest = PartManifest::named(name);
        manifest.additional_parts = additional.iter().map(|s| s.to_string()).collect();
        self.write_manifest(&manifest)
    }

    /// Write a part with a configure override in the default slot
    pub fn write_configured_part(&self, name: &str, additional: &[&str], operation: &str) -> PathBuf {
        let mut manifest = PartManifest::named(name);
        manifest.additional_parts = additional.iter().map(|s| s.to_string()).collect();
        manifest.configure.push(ConfigureDeclaration::new(operation));
        self.write_manifest(&manifest)
    }

    /// Write a compiled resource bundle
    pub fn write_bundle(
        &self,
        name: &str,
        items: &[(&str, &str)],
        resources: &[(&str, &str)],
    ) -> PathBuf {
        let mut manifest = PartManifest::named(name);
        manifest.items = items
            .iter()
            .map(|(identifier, type_name)| CompiledItem {
                identifier: identifier.to_string(),
                kind: "view".to_string(),
                type_name: type_name.to_string(),
            })
            .collect();
        manifest.resources = resources
            .iter()
            .map(|(path, type_name)| ResourceDeclaration {
                path: path.to_string(),
                type_name: type_name.to_string(),
            })
            .collect();
        self.write_manifest(&manifest)
    }

    /// Write raw contents to a file in the parts directory
    pub fn write_raw(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.parts_dir.join(file);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Write `<entry>.deps.json`
    pub fn write_deps(&self, entry: &str, components: &[&str]) -> PathBuf {
        let manifest = DependencyManifest {
            components: components.iter().map(|s| s.to_string()).collect(),
        };
        let path = self.parts_dir.join(format!("{}.deps.json", entry));
        std::fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
        path
    }

    /// Composer configuration pointing at the fixture
    pub fn config(&self, entry: &str) -> ComposerConfig {
        let mut config = ComposerConfig::new(entry);
        config.parts_dir = self.parts_dir.clone();
        config
    }

    pub fn parts_dir(&self) -> &Path {
        &self.parts_dir
    }
}

impl Default for PartTestFixture {
    fn default() -> Self {
        Self::new().expect("Failed to create test fixture")
    }
}
