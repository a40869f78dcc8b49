//! Part validation framework
//!
//! Provides manifest validation for discovered parts.

pub mod manifest_validator;

pub use manifest_validator::{ManifestValidator, ValidationResult};
