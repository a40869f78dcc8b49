//! Compiled resources feature
//!
//! Collects the compiled resource descriptors contributed by compiled
//! resource bundles.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::part::features::merge::{fold_key, merge};
use crate::part::manager::{ApplicationPart, FeatureProvider};
use crate::part::registry::manifest::{CompiledItem, ResourceDeclaration};
use crate::part::traits::Component;

/// One compiled resource visible to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledResourceDescriptor {
    /// Logical path; the declaration's path when present
    pub relative_path: String,
    pub item: Option<CompiledItem>,
    pub declaration: Option<ResourceDeclaration>,
    /// Bundle that contributed the resource
    pub source: Arc<Component>,
}

impl CompiledResourceDescriptor {
    /// Compiled type backing the resource, preferring the item
    pub fn type_name(&self) -> Option<&str> {
        self.item
            .as_ref()
            .map(|i| i.type_name.as_str())
            .or_else(|| self.declaration.as_ref().map(|d| d.type_name.as_str()))
    }
}

/// Feature collection of compiled resources
#[derive(Debug, Clone, Default)]
pub struct CompiledResourcesFeature {
    pub descriptors: Vec<CompiledResourceDescriptor>,
}

impl CompiledResourcesFeature {
    /// Descriptor for a path, ignoring case
    pub fn find(&self, path: &str) -> Option<&CompiledResourceDescriptor> {
        let key = fold_key(path);
        self.descriptors
            .iter()
            .find(|d| fold_key(&d.relative_path) == key)
    }
}

/// Populates [`CompiledResourcesFeature`] from compiled resource bundles
///
/// Parts are visited in registration order. When several bundles provide the
/// same path, the first one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledResourcesFeatureProvider;

impl FeatureProvider<CompiledResourcesFeature> for CompiledResourcesFeatureProvider {
    fn populate_feature(&self, parts: &[ApplicationPart], feature: &mut CompiledResourcesFeature) {
        let mut known: HashSet<String> = feature
            .descriptors
            .iter()
            .map(|d| fold_key(&d.relative_path))
            .collect();

        for part in parts {
            let ApplicationPart::CompiledResources(bundle) = part else {
                continue;
            };

            let manifest = bundle.manifest();
            let merged = merge(manifest.items.iter().cloned(), manifest.resources.iter().cloned());

            for record in merged {
                let relative_path = record
                    .declaration
                    .as_ref()
                    .map(|d| d.path.clone())
                    .unwrap_or(record.key);

                if !known.insert(fold_key(&relative_path)) {
                    debug!(
                        "Resource {} from {} is shadowed by an earlier part",
                        relative_path,
                        bundle.name()
                    );
                    continue;
                }

                feature.descriptors.push(CompiledResourceDescriptor {
                    relative_path,
                    item: record.item,
                    declaration: record.declaration,
                    source: Arc::clone(bundle),
                });
            }
        }
    }
}
