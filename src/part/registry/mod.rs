//! Part registry and discovery
//!
//! Handles component loading, manifest parsing, and host dependency contexts.

pub mod dependencies;
pub mod discovery;
pub mod manifest;

pub use dependencies::{DependencyManifest, DepsFileContext, NoDependencies, StaticDependencyContext};
pub use discovery::{DirectoryComponentLoader, InMemoryComponentLoader};
pub use manifest::{CompiledItem, ConfigureDeclaration, PartManifest, ResourceDeclaration, DEFAULT_SLOT};
