//! Part manager
//!
//! The shared registry that configure operations write to. Parts are kept in
//! the order they were added; feature providers rely on that order for
//! first-wins precedence.

use std::sync::Arc;
use tracing::debug;

use crate::part::traits::Component;

/// Kind of artifact a part contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// A plain component
    Component,
    /// A compiled resource bundle
    CompiledResources,
}

/// Artifact registered with the [`PartManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationPart {
    Component(Arc<Component>),
    CompiledResources(Arc<Component>),
}

impl ApplicationPart {
    pub fn component(component: Arc<Component>) -> Self {
        ApplicationPart::Component(component)
    }

    pub fn compiled_resources(component: Arc<Component>) -> Self {
        ApplicationPart::CompiledResources(component)
    }

    pub fn kind(&self) -> PartKind {
        match self {
            ApplicationPart::Component(_) => PartKind::Component,
            ApplicationPart::CompiledResources(_) => PartKind::CompiledResources,
        }
    }

    /// Component backing the artifact
    pub fn source(&self) -> &Arc<Component> {
        match self {
            ApplicationPart::Component(c) | ApplicationPart::CompiledResources(c) => c,
        }
    }

    pub fn name(&self) -> &str {
        self.source().name()
    }
}

/// Populates a feature collection from registered parts
pub trait FeatureProvider<F> {
    fn populate_feature(&self, parts: &[ApplicationPart], feature: &mut F);
}

/// Shared, ordered registry of application parts
#[derive(Debug, Default)]
pub struct PartManager {
    parts: Vec<ApplicationPart>,
}

impl PartManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part
    pub fn add(&mut self, part: ApplicationPart) {
        debug!("Registering {:?} part {}", part.kind(), part.name());
        self.parts.push(part);
    }

    /// Registered parts in registration order
    pub fn parts(&self) -> &[ApplicationPart] {
        &self.parts
    }

    /// Registered parts of one kind, in registration order
    pub fn parts_of_kind(&self, kind: PartKind) -> impl Iterator<Item = &ApplicationPart> {
        self.parts.iter().filter(move |p| p.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Run a feature provider over the registered parts
    pub fn populate_feature<F, P>(&self, provider: &P, feature: &mut F)
    where
        P: FeatureProvider<F> + ?Sized,
    {
        provider.populate_feature(&self.parts, feature);
    }
}
