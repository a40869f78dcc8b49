//! Part graph resolution
//!
//! Builds a [`PartGraph`] from an entry component by following declared
//! additional parts, probing for companion parts and attaching everything the
//! host's dependency context links.
//!
//! Each call to [`PartResolver::resolve_entry_point`] or
//! [`PartResolver::resolve_model`] is an independent pass with its own
//! memoization; nothing is cached across passes.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DiscoveryConfig;
use crate::part::model::{PartGraph, PartId};
use crate::part::registry::dependencies::NoDependencies;
use crate::part::traits::{Component, ComponentId, ComponentLoader, DependencyContext, PartError};
use crate::utils::result_to_option;

/// Resolves part graphs against a component loader
pub struct PartResolver<'a> {
    loader: &'a dyn ComponentLoader,
    dependencies: &'a dyn DependencyContext,
    companion_suffixes: Vec<String>,
    component_extension: String,
}

impl<'a> PartResolver<'a> {
    /// Create a resolver with default discovery settings and no dependency context
    pub fn new(loader: &'a dyn ComponentLoader) -> Self {
        Self::with_config(loader, &DiscoveryConfig::default())
    }

    /// Create a resolver using the given discovery settings
    pub fn with_config(loader: &'a dyn ComponentLoader, config: &DiscoveryConfig) -> Self {
        Self {
            loader,
            dependencies: &NoDependencies,
            companion_suffixes: config.companion_suffixes.clone(),
            component_extension: config.component_extension.clone(),
        }
    }

    /// Use `dependencies` to find the components linked into the host
    pub fn with_dependencies(mut self, dependencies: &'a dyn DependencyContext) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Resolve the host's entry component
    ///
    /// Every component the dependency context links, except the entry itself,
    /// becomes an additional part of the entry node.
    pub fn resolve_entry_point(&self, entry_name: &str) -> Result<PartGraph, PartError> {
        info!("Resolving parts for entry point {}", entry_name);

        let entry = self.loader.load(entry_name)?;
        let mut pass = ResolutionPass::new(self);

        let root = match pass.enter(&entry)? {
            Entered::Cached(id) => id,
            Entered::New(id) => id,
        };
        pass.resolve_declared(root, &entry)?;

        let linked = self.dependencies.resolve_components(&entry)?;
        debug!("Dependency context links {} components", linked.len());

        for name in linked {
            let component = self.loader.load(&name)?;
            if component.id() == entry.id() {
                continue;
            }

            let part = pass.resolve_part(component)?;
            pass.graph.add_additional_part(root, part)?;
        }

        pass.leave(root, &entry);

        let mut graph = pass.graph;
        graph.set_root(root);
        info!("Resolved {} parts for entry point {}", graph.len(), entry_name);
        Ok(graph)
    }

    /// Resolve a single component and its additional parts
    pub fn resolve_model(&self, name: &str) -> Result<PartGraph, PartError> {
        let component = self.loader.load(name)?;
        let mut pass = ResolutionPass::new(self);
        let root = pass.resolve_part(component)?;

        let mut graph = pass.graph;
        graph.set_root(root);
        Ok(graph)
    }

    /// Look for a companion component next to `component`
    ///
    /// Suffixes are tried in order. Missing files and files that fail to load
    /// are skipped.
    fn probe_companion(&self, component: &Component) -> Option<Arc<Component>> {
        let directory = component.location()?.parent()?;

        for suffix in &self.companion_suffixes {
            let file_name = format!(
                "{}{}{}",
                component.name(),
                suffix,
                self.component_extension
            );
            let path = directory.join(file_name);
            if !self.loader.exists(&path) {
                continue;
            }

            let context = format!("Ignoring companion {:?} of {}", path, component.name());
            if let Some(companion) = result_to_option(self.loader.load_from_path(&path), &context) {
                debug!("Found companion {} for {}", companion.name(), component.name());
                return Some(companion);
            }
        }

        None
    }
}

enum Entered {
    Cached(PartId),
    New(PartId),
}

/// State of one resolution pass
struct ResolutionPass<'r, 'a> {
    resolver: &'r PartResolver<'a>,
    graph: PartGraph,
    resolved: HashMap<ComponentId, PartId>,
    visiting: Vec<(ComponentId, String)>,
}

impl<'r, 'a> ResolutionPass<'r, 'a> {
    fn new(resolver: &'r PartResolver<'a>) -> Self {
        Self {
            resolver,
            graph: PartGraph::with_companion_suffixes(resolver.companion_suffixes.iter().cloned()),
            resolved: HashMap::new(),
            visiting: Vec::new(),
        }
    }

    fn resolve_part(&mut self, component: Arc<Component>) -> Result<PartId, PartError> {
        match self.enter(&component)? {
            Entered::Cached(id) => Ok(id),
            Entered::New(id) => {
                self.resolve_declared(id, &component)?;
                self.leave(id, &component);
                Ok(id)
            }
        }
    }

    fn enter(&mut self, component: &Arc<Component>) -> Result<Entered, PartError> {
        if let Some(&id) = self.resolved.get(component.id()) {
            return Ok(Entered::Cached(id));
        }

        if self.visiting.iter().any(|(id, _)| id == component.id()) {
            let mut path: Vec<String> = self.visiting.iter().map(|(_, n)| n.clone()).collect();
            path.push(component.name().to_string());
            return Err(PartError::Cycle {
                name: component.name().to_string(),
                path,
            });
        }

        self.visiting
            .push((component.id().clone(), component.name().to_string()));
        debug!("Resolving part {}", component.name());
        Ok(Entered::New(self.graph.add_part(Arc::clone(component))))
    }

    fn resolve_declared(&mut self, node: PartId, component: &Component) -> Result<(), PartError> {
        let manifest = component.manifest();

        for name in &manifest.additional_parts {
            let additional = self.resolver.loader.load(name)?;
            let part = self.resolve_part(additional)?;
            self.graph.add_additional_part(node, part)?;
        }

        // Parts using the explicit primitives still get their companion
        // when they also override configuration.
        if manifest.additional_parts.is_empty() || manifest.has_configure_overrides() {
            if let Some(companion) = self.resolver.probe_companion(component) {
                let part = self.resolve_part(companion)?;
                self.graph.add_additional_part(node, part)?;
            }
        }

        Ok(())
    }

    fn leave(&mut self, node: PartId, component: &Component) {
        self.visiting.retain(|(id, _)| id != component.id());
        self.resolved.insert(component.id().clone(), node);
    }
}
