//! Part loader implementation
//!
//! Resolves the host's parts and runs their configure operations in
//! registration order.

use tracing::{debug, info};

use crate::config::ComposerConfig;
use crate::part::configure::OperationRegistry;
use crate::part::manager::PartManager;
use crate::part::model::PartGraph;
use crate::part::registry::{DepsFileContext, DirectoryComponentLoader};
use crate::part::resolver::PartResolver;
use crate::part::traits::PartError;

/// Bootstraps a [`PartManager`] from a part graph
pub struct PartLoader;

impl PartLoader {
    /// Resolve `entry`, then configure every part in order
    ///
    /// Nothing is written to the manager unless the whole graph resolves.
    pub fn configure_parts(
        manager: &mut PartManager,
        resolver: &PartResolver<'_>,
        operations: &OperationRegistry,
        entry: &str,
    ) -> Result<PartGraph, PartError> {
        let graph = resolver.resolve_entry_point(entry)?;
        Self::configure_graph(manager, &graph, operations)?;
        Ok(graph)
    }

    /// Configure every part of a resolved graph in registration order
    pub fn configure_graph(
        manager: &mut PartManager,
        graph: &PartGraph,
        operations: &OperationRegistry,
    ) -> Result<(), PartError> {
        let order = graph.parts_in_order();
        info!("Configuring {} parts", order.len());

        // Every override must name a known operation before anything is registered
        let planned = order
            .into_iter()
            .map(|id| {
                let part = graph.part(id);
                operations.operation_for(part).map(|op| (part, op))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (part, operation) in planned {
            debug!("Configuring part {}", part.name());
            operation.configure(manager, part)?;
        }

        info!("Part manager holds {} parts", manager.len());
        Ok(())
    }

    /// Discover parts on disk as described by `config` and configure them
    pub fn configure_parts_with_discovery(
        manager: &mut PartManager,
        config: &ComposerConfig,
        operations: &OperationRegistry,
    ) -> Result<PartGraph, PartError> {
        let loader = DirectoryComponentLoader::with_config(&config.parts_dir, &config.discovery);
        let dependencies = DepsFileContext::with_config(&config.discovery);
        let resolver =
            PartResolver::with_config(&loader, &config.discovery).with_dependencies(&dependencies);

        Self::configure_parts(manager, &resolver, operations, &config.entry_point)
    }
}
