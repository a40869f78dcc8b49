//! Part system tests
//!
//! Tests for resolution against manifests on disk and for the full
//! bootstrap into a part manager.

pub mod bootstrap_tests;
pub mod resolution_tests;
pub mod test_utils;
