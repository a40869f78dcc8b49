//! Feature population
//!
//! Builds feature collections from registered application parts.

pub mod merge;
pub mod resources;

pub use merge::{merge, Keyed, MergedRecord, MergedRecords};
pub use resources::{
    CompiledResourceDescriptor, CompiledResourcesFeature, CompiledResourcesFeatureProvider,
};
