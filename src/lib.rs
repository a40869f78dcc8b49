//! Part Composer - part discovery for composable hosts
//!
//! A host application is composed of parts: its entry component, the
//! components it links, the additional parts those components declare and
//! companion bundles found next to them. This crate resolves that graph,
//! orders it deterministically and registers each part with a shared
//! [`PartManager`] through the part's configure operation.
//!
//! ## Design Principles
//!
//! 1. **Deterministic order**: registration order never depends on load or
//!    directory enumeration order
//! 2. **Fail whole**: cycles, missing declared parts and bad configure
//!    overrides abort bootstrap before anything is registered
//! 3. **Typed manifests**: declared metadata is a TOML manifest per component
//!
//! ## Example
//! ```no_run
//! use part_composer::{ComposerConfig, OperationRegistry, PartLoader, PartManager};
//!
//! let config = ComposerConfig::new("MyApp");
//! let mut manager = PartManager::new();
//! PartLoader::configure_parts_with_discovery(
//!     &mut manager,
//!     &config,
//!     &OperationRegistry::with_builtins(),
//! )?;
//! # Ok::<(), part_composer::PartError>(())
//! ```

pub mod config;
pub mod part;
pub mod utils;

// Re-export config module
pub use config::*;

pub use part::{
    ApplicationPart, Component, ComponentId, ComponentLoader, ConfigureOperation,
    DependencyContext, FeatureProvider, OperationRegistry, PartError, PartGraph, PartId, PartKind,
    PartLoader, PartManager, PartNode, PartRef, PartResolver,
};
