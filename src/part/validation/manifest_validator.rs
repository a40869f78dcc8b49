//! Manifest validation
//!
//! Validates part manifests for structure and naming.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::part::registry::manifest::PartManifest;

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Manifest is valid
    Valid,
    /// Manifest is invalid with specific errors
    Invalid(Vec<String>),
}

/// Manifest validator
pub struct ManifestValidator {
    /// Maximum part name length
    max_name_len: usize,
}

impl ManifestValidator {
    /// Create a new manifest validator
    pub fn new() -> Self {
        Self { max_name_len: 256 }
    }

    /// Validate a part manifest
    pub fn validate(&self, manifest: &PartManifest) -> ValidationResult {
        let mut errors = Vec::new();

        if !self.is_valid_name(&manifest.name) {
            errors.push(format!(
                "Invalid part name: {:?} (must be alphanumeric with dots/dashes/underscores)",
                manifest.name
            ));
        }

        if let Err(part_errors) = self.validate_additional_parts(manifest) {
            errors.extend(part_errors);
        }

        for declaration in &manifest.configure {
            if declaration.operation.is_empty() {
                errors.push(format!(
                    "Configure declaration for slot {:?} has no operation",
                    declaration.slot
                ));
            }
            if declaration.slot.is_empty() {
                errors.push("Configure declaration slot cannot be empty".to_string());
            }
        }

        for item in &manifest.items {
            if item.identifier.is_empty() {
                errors.push("Compiled item identifier cannot be empty".to_string());
            }
            if item.type_name.is_empty() {
                errors.push(format!("Compiled item {} has no type", item.identifier));
            }
        }

        for resource in &manifest.resources {
            if resource.path.is_empty() {
                errors.push("Resource declaration path cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            debug!("Manifest validation passed for part: {}", manifest.name);
            ValidationResult::Valid
        } else {
            warn!(
                "Manifest validation failed for part {}: {:?}",
                manifest.name, errors
            );
            ValidationResult::Invalid(errors)
        }
    }

    /// Validate part name format
    #[inline]
    fn is_valid_name(&self, name: &str) -> bool {
        if name.is_empty() || name.len() > self.max_name_len {
            return false;
        }

        if !name.chars().next().map_or(false, |c| c.is_alphanumeric()) {
            return false;
        }

        name.chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')
    }

    fn validate_additional_parts(&self, manifest: &PartManifest) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for name in &manifest.additional_parts {
            if !self.is_valid_name(name) {
                errors.push(format!("Invalid additional part name: {:?}", name));
            }
            if name == &manifest.name {
                errors.push(format!("Part {} declares itself as an additional part", name));
            }
            if !seen.insert(name.as_str()) {
                errors.push(format!("Additional part {} declared twice", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for ManifestValidator {
    fn default() -> Self {
        Self::new()
    }
}
