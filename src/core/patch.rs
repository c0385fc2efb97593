//! Patch discovery.
//!
//! Patches live under a single patch root:
//!
//! ```text
//! patches/
//!   core/               <- patches against Drupal core
//!   contrib/<module>/   <- patches against one contributed module
//! ```
//!
//! A missing directory simply means the project has no patches.

use std::path::{Path, PathBuf};

use crate::util::fs::list_dir_names;

/// Marker a file name must contain to be treated as a patch.
pub const PATCH_MARKER: &str = ".patch";

/// Subdirectory of the patch root holding core patches.
pub const CORE_PATCH_DIR: &str = "core";

/// Subdirectory of the patch root holding per-module patch directories.
pub const CONTRIB_PATCH_DIR: &str = "contrib";

/// Check whether a file name refers to a patch.
///
/// The marker must appear after the first character, so dot entries and a
/// file literally named `.patch` are rejected.
pub fn is_patch_file(name: &str) -> bool {
    matches!(name.find(PATCH_MARKER), Some(pos) if pos > 0)
}

/// Manifest path of the core patch directory, relative to `root`.
pub fn core_patch_path(root: &str) -> String {
    format!("{}/{}", root, CORE_PATCH_DIR)
}

/// Manifest path of a module's patch directory, relative to `root`.
pub fn module_patch_path(root: &str, machine_name: &str) -> String {
    format!("{}/{}/{}", root, CONTRIB_PATCH_DIR, machine_name)
}

/// File names found in one project's patch directory.
///
/// Holds every entry of the directory in listing order. Only entries passing
/// [`is_patch_file`] are ever rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSet {
    entries: Vec<String>,
}

impl PatchSet {
    /// An empty patch set.
    pub fn empty() -> Self {
        PatchSet::default()
    }

    /// All directory entries, including non-patch files.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Recognized patch file names, in listing order.
    pub fn patches(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|name| is_patch_file(name))
    }

    /// Whether at least one entry is a recognized patch.
    pub fn has_patches(&self) -> bool {
        self.patches().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.patches().count()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_patches()
    }
}

impl From<Vec<String>> for PatchSet {
    fn from(entries: Vec<String>) -> Self {
        PatchSet { entries }
    }
}

impl<'a> FromIterator<&'a str> for PatchSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        PatchSet {
            entries: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Finds patch files for projects under a patch root.
#[derive(Debug, Clone)]
pub struct PatchLocator {
    root: PathBuf,
}

impl PatchLocator {
    /// Create a locator rooted at the patch storage directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PatchLocator { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding core patches.
    pub fn core_dir(&self) -> PathBuf {
        self.root.join(CORE_PATCH_DIR)
    }

    /// Directory holding patches for one contributed module.
    pub fn module_dir(&self, machine_name: &str) -> PathBuf {
        self.root.join(CONTRIB_PATCH_DIR).join(machine_name)
    }

    /// Patches for Drupal core.
    pub fn core_patches(&self) -> PatchSet {
        Self::list(&self.core_dir())
    }

    /// Patches for a contributed module.
    pub fn module_patches(&self, machine_name: &str) -> PatchSet {
        Self::list(&self.module_dir(machine_name))
    }

    /// List the file names in `dir`, sorted by name.
    ///
    /// Returns an empty set when `dir` does not exist or is not a directory.
    pub fn list(dir: &Path) -> PatchSet {
        if !dir.is_dir() {
            tracing::trace!("no patch directory at {}", dir.display());
            return PatchSet::empty();
        }

        match list_dir_names(dir, true) {
            Ok(names) => PatchSet::from(names),
            Err(e) => {
                tracing::warn!("failed to list patches in {}: {:#}", dir.display(), e);
                PatchSet::empty()
            }
        }
    }
}
