//! Part ordering
//!
//! Flattens a part graph into the order parts are registered in. Consider
//!
//! ```text
//! App -> [ App.Views, ClassLib1, ClassLib2 ]
//! ClassLib1 -> [ ModuleComponent, Component1 ]
//! ModuleComponent -> [ ThemingModule ]
//! ```
//!
//! Parts are emitted pre-order: a part is immediately followed by its own
//! additional parts. Peers with the larger subtree go first, equal subtrees
//! are ordered by name, so the result is
//! `App, ClassLib1, ModuleComponent, ThemingModule, Component1, App.Views, ClassLib2`.

use std::collections::{HashMap, HashSet};

use crate::part::model::{PartGraph, PartId};

/// Flatten the subtree under `root` into registration order
///
/// A part reachable through several parents is emitted once, at its first
/// position in the walk. The graph itself is not modified.
///
/// # Panics
///
/// Panics if `root` or any id reachable from it was not issued by `graph`.
pub fn order_parts(graph: &PartGraph, root: PartId) -> Vec<PartId> {
    let mut weights = HashMap::new();
    let mut emitted = HashSet::new();
    let mut walk = Vec::new();
    enumerate(graph, root, &mut weights, &mut emitted, &mut walk);
    walk
}

/// Number of parts in the subtree under `id`, counting `id` itself
///
/// Shared parts count once per path that reaches them. The count saturates
/// at `usize::MAX` on deeply layered diamonds.
pub fn subtree_weight(graph: &PartGraph, id: PartId) -> usize {
    weight(graph, id, &mut HashMap::new())
}

fn weight(graph: &PartGraph, id: PartId, memo: &mut HashMap<PartId, usize>) -> usize {
    if let Some(&w) = memo.get(&id) {
        return w;
    }

    let w = graph
        .node(id)
        .additional_parts()
        .iter()
        .fold(1usize, |acc, &child| acc.saturating_add(weight(graph, child, memo)));
    memo.insert(id, w);
    w
}

fn enumerate(
    graph: &PartGraph,
    id: PartId,
    weights: &mut HashMap<PartId, usize>,
    emitted: &mut HashSet<PartId>,
    out: &mut Vec<PartId>,
) {
    // A part seen before already emitted its whole subtree
    if !emitted.insert(id) {
        return;
    }
    out.push(id);

    let mut children: Vec<(usize, PartId)> = graph
        .node(id)
        .additional_parts()
        .iter()
        .map(|&child| (weight(graph, child, weights), child))
        .collect();
    children.sort_by(|(wa, a), (wb, b)| {
        wb.cmp(wa)
            .then_with(|| graph.node(*a).name().as_bytes().cmp(graph.node(*b).name().as_bytes()))
    });

    for (_, child) in children {
        enumerate(graph, child, weights, emitted, out);
    }
}

impl PartGraph {
    /// Registration order of a resolved graph, starting at its root
    pub fn parts_in_order(&self) -> Vec<PartId> {
        self.root()
            .map(|root| order_parts(self, root))
            .unwrap_or_default()
    }
}
