//! drupal-make - Generate drush make files from an existing Drupal site
//!
//! This crate scans a checked-out Drupal codebase (core plus contributed
//! modules and a directory of patches) and renders a make file that can
//! rebuild the same site from upstream releases.

pub mod core;
pub mod ops;
pub mod util;
pub mod writer;

/// Test utilities for drupal-make unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It lays out temporary Drupal sites on disk.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{PatchLocator, PatchSet, ProjectInfo, VersionPatterns};
pub use ops::{generate, generate_manifest, GenerateOptions, GenerateSummary};
pub use util::config::Config;
pub use writer::{writer_for, Format, ManifestWriter};
