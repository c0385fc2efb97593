//! High-level operations.
//!
//! This module contains the implementation of drupal-make runs.

pub mod generate;

pub use generate::{
    generate, generate_manifest, GenerateOptions, GenerateSummary, ModuleOrder, SkipReason,
    UnversionedPolicy,
};
