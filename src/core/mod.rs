//! Core data structures for drupal-make.
//!
//! This module contains the foundational types used throughout the scan:
//! - Project records (core and contributed modules)
//! - Patch discovery
//! - Version and name extraction from metadata files

pub mod metadata;
pub mod patch;
pub mod project;

pub use metadata::{is_info_file, VersionPatterns};
pub use patch::{is_patch_file, PatchLocator, PatchSet};
pub use project::ProjectInfo;
