//! Part model
//!
//! A resolved part graph is an arena of [`PartNode`]s indexed by [`PartId`].
//! Children are owned indices; the parent link is a plain index used for
//! diagnostics only. A component identity maps to at most one node.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::part::manager::ApplicationPart;
use crate::part::registry::manifest::PartManifest;
use crate::part::traits::{Component, ComponentId, PartError};

/// Suffixes marking a compiled resource bundle, most specific first
pub const COMPANION_SUFFIXES: &[&str] = &[".PrecompiledViews", ".Views"];

/// Index of a node within its [`PartGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(usize);

impl PartId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One discovered component
#[derive(Debug, Clone)]
pub struct PartNode {
    component: Arc<Component>,
    name: String,
    parent: Option<PartId>,
    additional_parts: Vec<PartId>,
}

impl PartNode {
    pub fn id(&self) -> &ComponentId {
        self.component.id()
    }

    /// Display name, used for ordering tie-breaks and diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> &Arc<Component> {
        &self.component
    }

    pub fn manifest(&self) -> &PartManifest {
        self.component.manifest()
    }

    /// Last part that declared this one as an additional part
    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    /// Additional parts in insertion order
    pub fn additional_parts(&self) -> &[PartId] {
        &self.additional_parts
    }
}

impl PartialEq for PartNode {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for PartNode {}

/// Arena of resolved parts
#[derive(Debug, Clone)]
pub struct PartGraph {
    nodes: Vec<PartNode>,
    by_identity: HashMap<ComponentId, PartId>,
    root: Option<PartId>,
    companion_suffixes: Vec<String>,
}

impl Default for PartGraph {
    fn default() -> Self {
        Self::with_companion_suffixes(COMPANION_SUFFIXES.iter().map(|s| s.to_string()))
    }
}

impl PartGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph whose compiled resource bundles carry one of `suffixes`
    ///
    /// The suffixes should be the ones companions were probed with.
    pub fn with_companion_suffixes<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: Vec::new(),
            by_identity: HashMap::new(),
            root: None,
            companion_suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Suffixes marking compiled resource bundles in this graph
    pub fn companion_suffixes(&self) -> &[String] {
        &self.companion_suffixes
    }

    /// Add a node for `component` named after the component
    pub fn add_part(&mut self, component: Arc<Component>) -> PartId {
        let name = component.name().to_string();
        self.add_named_part(component, name)
    }

    /// Add a node with an explicit display name
    ///
    /// Adding a component whose identity is already present returns the
    /// existing node.
    pub fn add_named_part(&mut self, component: Arc<Component>, name: impl Into<String>) -> PartId {
        if let Some(&existing) = self.by_identity.get(component.id()) {
            return existing;
        }

        let id = PartId(self.nodes.len());
        self.by_identity.insert(component.id().clone(), id);
        self.nodes.push(PartNode {
            component,
            name: name.into(),
            parent: None,
            additional_parts: Vec::new(),
        });
        id
    }

    /// Append `child` to the additional parts of `parent`
    ///
    /// Rejects an edge that would make the graph cyclic.
    pub fn add_additional_part(&mut self, parent: PartId, child: PartId) -> Result<(), PartError> {
        if parent == child || self.reaches(child, parent) {
            return Err(PartError::Cycle {
                name: self.nodes[child.0].name.clone(),
                path: vec![
                    self.nodes[parent.0].name.clone(),
                    self.nodes[child.0].name.clone(),
                ],
            });
        }

        self.nodes[parent.0].additional_parts.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    fn reaches(&self, from: PartId, to: PartId) -> bool {
        let mut stack = vec![from];
        let mut seen = vec![false; self.nodes.len()];
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if std::mem::replace(&mut seen[current.0], true) {
                continue;
            }
            stack.extend(self.nodes[current.0].additional_parts.iter().copied());
        }
        false
    }

    pub fn set_root(&mut self, root: PartId) {
        self.root = Some(root);
    }

    /// Entry node of a resolved graph
    pub fn root(&self) -> Option<PartId> {
        self.root
    }

    /// Node for `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph. Use [`PartGraph::get`]
    /// for ids of unknown origin.
    pub fn node(&self, id: PartId) -> &PartNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: PartId) -> Option<&PartNode> {
        self.nodes.get(id.0)
    }

    /// Node for a component identity
    pub fn find(&self, identity: &ComponentId) -> Option<PartId> {
        self.by_identity.get(identity).copied()
    }

    /// First node with the given display name
    pub fn find_by_name(&self, name: &str) -> Option<PartId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(PartId)
    }

    /// Borrowed view of `id`; panics like [`PartGraph::node`]
    pub fn part(&self, id: PartId) -> PartRef<'_> {
        PartRef { graph: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PartRef<'_>> {
        (0..self.nodes.len()).map(move |i| self.part(PartId(i)))
    }
}

/// Borrowed view of one node together with its graph
#[derive(Clone, Copy)]
pub struct PartRef<'a> {
    graph: &'a PartGraph,
    id: PartId,
}

impl<'a> PartRef<'a> {
    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn graph(&self) -> &'a PartGraph {
        self.graph
    }

    pub fn node(&self) -> &'a PartNode {
        self.graph.node(self.id)
    }

    pub fn name(&self) -> &'a str {
        self.node().name()
    }

    pub fn component(&self) -> &'a Arc<Component> {
        self.node().component()
    }

    pub fn parent(&self) -> Option<PartRef<'a>> {
        self.node().parent().map(|p| self.graph.part(p))
    }

    pub fn additional_parts(&self) -> impl Iterator<Item = PartRef<'a>> + 'a {
        let graph = self.graph;
        self.node()
            .additional_parts()
            .iter()
            .map(move |&id| graph.part(id))
    }

    /// Whether the part is a compiled resource bundle
    ///
    /// Matches the graph's companion suffixes, ignoring ASCII case.
    pub fn is_compiled_resources(&self) -> bool {
        let name = self.name().to_ascii_lowercase();
        self.graph
            .companion_suffixes()
            .iter()
            .any(|suffix| name.ends_with(&suffix.to_ascii_lowercase()))
    }

    /// Registry artifact contributed by this part
    pub fn to_application_part(&self) -> ApplicationPart {
        if self.is_compiled_resources() {
            ApplicationPart::compiled_resources(self.component().clone())
        } else {
            ApplicationPart::component(self.component().clone())
        }
    }
}

impl fmt::Debug for PartRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

impl fmt::Display for PartRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
