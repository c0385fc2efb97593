//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

/// Read a file as text, replacing invalid UTF-8 rather than failing.
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a file as text, treating a missing or unreadable file as absent.
///
/// Legacy `.info` and `bootstrap.inc` files are often Latin-1, so bytes that
/// are not valid UTF-8 are replaced instead of discarding the whole file.
pub fn read_optional(path: &Path) -> Option<String> {
    match read_lossy(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            tracing::debug!("{:#}", e);
            None
        }
    }
}

/// Immediate children of `dir`.
///
/// With `sorted` the entries come back ordered by file name; otherwise in
/// whatever order the filesystem yields them. Symlinks are followed so a
/// linked module directory counts as a directory.
fn child_entries(dir: &Path, sorted: bool) -> Result<Vec<DirEntry>> {
    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    let mut entries = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) if e.depth() == 0 => {
                return Err(e)
                    .with_context(|| format!("failed to read directory: {}", dir.display()));
            }
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
            }
        }
    }

    Ok(entries)
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

/// Names of all entries (files and directories) directly inside `dir`.
pub fn list_dir_names(dir: &Path, sorted: bool) -> Result<Vec<String>> {
    Ok(child_entries(dir, sorted)?.iter().map(entry_name).collect())
}

/// Names and paths of the regular files directly inside `dir`.
pub fn list_files(dir: &Path, sorted: bool) -> Result<Vec<(String, PathBuf)>> {
    Ok(child_entries(dir, sorted)?
        .into_iter()
        .filter(|e| e.file_type().is_file())
        .map(|e| (entry_name(&e), e.into_path()))
        .collect())
}

/// Names and paths of the directories directly inside `dir`.
pub fn list_subdirs(dir: &Path, sorted: bool) -> Result<Vec<(String, PathBuf)>> {
    Ok(child_entries(dir, sorted)?
        .into_iter()
        .filter(|e| e.file_type().is_dir())
        .map(|e| (entry_name(&e), e.into_path()))
        .collect())
}

/// Render a path the way manifests expect it: `/`-separated, no trailing slash.
pub fn display_path(path: &Path) -> String {
    let rendered = path.to_string_lossy();

    #[cfg(windows)]
    let rendered = rendered.replace('\\', "/");

    let trimmed = rendered.trim_end_matches('/');
    if trimmed.is_empty() {
        rendered.to_string()
    } else {
        trimmed.to_string()
    }
}
