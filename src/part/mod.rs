//! Part system
//!
//! Discovers the parts a host is composed of and registers them in a
//! deterministic order.
//!
//! ## Architecture
//!
//! - **Model**: resolved parts live in an arena, one node per component identity
//! - **Resolution**: declared additional parts, companion parts and linked
//!   components are followed from the entry point; cycles abort resolution
//! - **Ordering**: pre-order walk, larger subtrees first, names break ties
//! - **Configuration**: each part's configure operation writes to the shared
//!   part manager in that order
//! - **Features**: feature providers read the registered parts back

pub mod configure;
pub mod features;
pub mod loader;
pub mod manager;
pub mod model;
pub mod ordering;
pub mod registry;
pub mod resolver;
pub mod traits;
pub mod validation;

pub use configure::{ConfigureOperation, OperationRegistry};
pub use loader::PartLoader;
pub use manager::{ApplicationPart, FeatureProvider, PartKind, PartManager};
pub use model::{PartGraph, PartId, PartNode, PartRef, COMPANION_SUFFIXES};
pub use ordering::{order_parts, subtree_weight};
pub use resolver::PartResolver;
pub use traits::{Component, ComponentId, ComponentLoader, DependencyContext, PartError};
