//! Part loading system
//!
//! Runs configure operations for resolved parts.

pub mod loader;

pub use loader::PartLoader;
