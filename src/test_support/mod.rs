//! Test utilities for drupal-make unit tests.
//!
//! Provides [`SiteFixture`], a builder that lays out a throwaway Drupal site
//! (docroot, contrib modules and patches) in a temporary directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_make::test_support::{info_file, SiteFixture};
//!
//! let site = SiteFixture::new()
//!     .core_version("7.89")
//!     .module("views", "views.info", &info_file("Views", Some("7.x-3.24")))
//!     .module_patch("views", "views-123.patch");
//! let opts = site.options(Format::Legacy);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::patch::{CONTRIB_PATCH_DIR, CORE_PATCH_DIR};
use crate::ops::generate::{GenerateOptions, CORE_VERSION_FILE};
use crate::util::config::{Config, CONTRIB_SUBDIR, DEFAULT_PATCH_ROOT};
use crate::writer::Format;

/// Contents of a packaged `.info` file.
pub fn info_file(name: &str, version: Option<&str>) -> String {
    let mut contents = format!(
        "name = {}\ndescription = Test module.\ncore = 7.x\n",
        name
    );
    if let Some(version) = version {
        contents.push_str(&format!(
            "\n; Information added by Drupal.org packaging script\nversion = \"{}\"\ncore = \"7.x\"\n",
            version
        ));
    }
    contents
}

/// A temporary Drupal site on disk.
pub struct SiteFixture {
    tmp: TempDir,
}

impl SiteFixture {
    /// Create an empty site.
    pub fn new() -> Self {
        SiteFixture {
            tmp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn docroot(&self) -> PathBuf {
        self.root().join("docroot")
    }

    pub fn contrib_dir(&self) -> PathBuf {
        self.docroot().join(CONTRIB_SUBDIR)
    }

    pub fn patch_root(&self) -> PathBuf {
        self.root().join(DEFAULT_PATCH_ROOT)
    }

    /// Write `bootstrap.inc` declaring the given core version.
    pub fn core_version(self, version: &str) -> Self {
        let contents = format!(
            "<?php\n\n/**\n * The current system version.\n */\ndefine('VERSION', '{}');\n",
            version
        );
        self.bootstrap(&contents)
    }

    /// Write `bootstrap.inc` with arbitrary contents.
    pub fn bootstrap(self, contents: &str) -> Self {
        let path = self.docroot().join(CORE_VERSION_FILE);
        write_file(&path, contents);
        self
    }

    /// Add an `.info` (or any) file to a module directory.
    pub fn module(self, name: &str, file: &str, contents: &str) -> Self {
        self.module_file(name, file, contents)
    }

    /// Add a file to a module directory.
    pub fn module_file(self, name: &str, file: &str, contents: &str) -> Self {
        let path = self.contrib_dir().join(name).join(file);
        write_file(&path, contents);
        self
    }

    /// Add a core patch file.
    pub fn core_patch(self, file: &str) -> Self {
        let path = self.patch_root().join(CORE_PATCH_DIR).join(file);
        write_file(&path, "--- a\n+++ b\n");
        self
    }

    /// Add a patch file for a module.
    pub fn module_patch(self, module: &str, file: &str) -> Self {
        let path = self
            .patch_root()
            .join(CONTRIB_PATCH_DIR)
            .join(module)
            .join(file);
        write_file(&path, "--- a\n+++ b\n");
        self
    }

    /// Options scanning this site, with patches written as `patches/...`.
    pub fn options(&self, format: Format) -> GenerateOptions {
        let mut config = Config::default();
        config.paths.docroot = Some(self.docroot());
        config.paths.patches = Some(self.patch_root());
        config.manifest.format = Some(format);
        config.manifest.patch_prefix = Some(DEFAULT_PATCH_ROOT.to_string());
        config.resolve().expect("default config must resolve")
    }
}

impl Default for SiteFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create fixture directory");
    }
    fs::write(path, contents).expect("failed to write fixture file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let site = SiteFixture::new()
            .core_version("7.89")
            .module("views", "views.info", &info_file("Views", Some("7.x-3.24")))
            .module_patch("views", "fix.patch")
            .core_patch("core.patch");

        assert!(site.docroot().join("includes/bootstrap.inc").is_file());
        assert!(site.contrib_dir().join("views/views.info").is_file());
        assert!(site.patch_root().join("contrib/views/fix.patch").is_file());
        assert!(site.patch_root().join("core/core.patch").is_file());
    }

    #[test]
    fn test_info_file_contents() {
        let with_version = info_file("Views", Some("7.x-3.24"));
        assert!(with_version.contains("name = Views"));
        assert!(with_version.contains("version = \"7.x-3.24\""));

        assert!(!info_file("Devel", None).contains("version"));
    }
}
