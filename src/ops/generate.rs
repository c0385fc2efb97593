//! Implementation of manifest generation.
//!
//! A run is one linear pass over an already checked-out site:
//!
//! 1. preface
//! 2. Drupal core: version from `includes/bootstrap.inc`, patches from `<patches>/core`
//! 3. every directory under the contrib root: version and name from its
//!    `.info` file, patches from `<patches>/contrib/<module>`
//!
//! Missing inputs never abort the run. A missing core version renders as an
//! empty field, a missing patch directory means no patches, and a module
//! directory without an `.info` file is left out of the manifest.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{is_info_file, PatchLocator, ProjectInfo, VersionPatterns};
use crate::util::config::ConfigError;
use crate::util::fs::{list_files, list_subdirs, read_optional};
use crate::writer::{writer_for, Format, ManifestWriter, WriterSettings};

/// File inside the docroot that declares the core version.
pub const CORE_VERSION_FILE: &str = "includes/bootstrap.inc";

/// Order in which module directories are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleOrder {
    /// Sorted by machine name, reproducible across machines
    #[default]
    Sorted,
    /// Raw filesystem enumeration order, not guaranteed stable
    Scan,
}

impl FromStr for ModuleOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sorted" => Ok(ModuleOrder::Sorted),
            "scan" => Ok(ModuleOrder::Scan),
            _ => Err(ConfigError::InvalidModuleOrder(s.to_string())),
        }
    }
}

/// What to do with a module whose `.info` files carry no usable version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnversionedPolicy {
    /// Write the module with an empty version
    #[default]
    Include,
    /// Leave the module out of the manifest
    Skip,
}

impl FromStr for UnversionedPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "include" => Ok(UnversionedPolicy::Include),
            "skip" => Ok(UnversionedPolicy::Skip),
            _ => Err(ConfigError::InvalidUnversionedPolicy(s.to_string())),
        }
    }
}

/// Everything one run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Output format
    pub format: Format,

    /// Drupal docroot
    pub docroot: PathBuf,

    /// Patch storage root on disk
    pub patch_root: PathBuf,

    /// Patch root as written into the manifest
    pub patch_prefix: String,

    /// Directory whose subdirectories are contributed modules
    pub contrib_dir: PathBuf,

    /// Version and name extraction patterns
    pub patterns: VersionPatterns,

    /// Module emission order
    pub module_order: ModuleOrder,

    /// Handling of modules without a version
    pub unversioned: UnversionedPolicy,
}

impl GenerateOptions {
    /// Path of the file declaring the core version.
    pub fn core_version_file(&self) -> PathBuf {
        self.docroot.join(CORE_VERSION_FILE)
    }

    /// Settings for constructing the writer.
    pub fn writer_settings(&self) -> WriterSettings {
        WriterSettings {
            core_compatibility: self.patterns.compatibility().to_string(),
            patch_root: self.patch_prefix.clone(),
        }
    }
}

/// Why a module directory was left out of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The directory contains no `.info` file
    NoInfoFile,
    /// No `.info` file yields a version and the policy is `skip`
    NoVersion,
    /// The directory could not be listed
    Unreadable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoInfoFile => write!(f, "no .info file"),
            SkipReason::NoVersion => write!(f, "no version found"),
            SkipReason::Unreadable => write!(f, "directory not readable"),
        }
    }
}

/// Outcome of scanning one module directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleScan {
    Found(ProjectInfo),
    Skipped(SkipReason),
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Core version, if one was found
    pub core_version: Option<String>,

    /// Modules written, in output order
    pub modules: Vec<String>,

    /// Modules left out, with the reason
    pub skipped: Vec<(String, SkipReason)>,
}

/// Generate a manifest with the writer selected by `opts.format`.
pub fn generate(opts: &GenerateOptions, out: &mut dyn Write) -> Result<GenerateSummary> {
    let writer = writer_for(opts.format, opts.writer_settings());
    generate_manifest(opts, writer.as_ref(), out)
}

/// Scan the site described by `opts` and render it through `writer`.
///
/// Only failures to write `out` are returned as errors.
pub fn generate_manifest(
    opts: &GenerateOptions,
    writer: &dyn ManifestWriter,
    out: &mut dyn Write,
) -> Result<GenerateSummary> {
    let locator = PatchLocator::new(&opts.patch_root);
    let mut summary = GenerateSummary::default();
    tracing::debug!("looking for patches under {}", locator.root().display());

    tracing::debug!("writing {} manifest", writer.format());
    writer
        .write_preface(out)
        .context("failed to write manifest preface")?;

    let core_version = resolve_core_version(&opts.core_version_file(), &opts.patterns);
    let core = ProjectInfo::core(core_version.clone().unwrap_or_default());
    let core_patches = locator.core_patches();
    tracing::debug!("core {} with {} patch(es)", core, core_patches.len());
    writer
        .write_core(out, core.version(), &core_patches)
        .context("failed to write core entry")?;
    summary.core_version = core_version;

    for (name, dir) in discover_modules(&opts.contrib_dir, opts.module_order) {
        match scan_module(&name, &dir, &opts.patterns, opts.unversioned) {
            ModuleScan::Found(project) => {
                if !project.has_version() {
                    tracing::warn!("no version found for {}, writing it unversioned", name);
                }
                let patches = locator.module_patches(project.machine_name());
                tracing::debug!("module {} with {} patch(es)", project, patches.len());
                writer
                    .write_module(out, &project, project.version(), &patches)
                    .with_context(|| format!("failed to write entry for `{}`", name))?;
                summary.modules.push(name);
            }
            ModuleScan::Skipped(reason) => {
                tracing::debug!("skipping {}: {}", name, reason);
                summary.skipped.push((name, reason));
            }
        }
    }

    out.flush().context("failed to flush manifest output")?;
    Ok(summary)
}

/// Read the core version from `bootstrap.inc`.
///
/// Returns `None` when the file is missing or carries no version declaration.
pub fn resolve_core_version(path: &Path, patterns: &VersionPatterns) -> Option<String> {
    let Some(contents) = read_optional(path) else {
        tracing::warn!("core version file not found: {}", path.display());
        return None;
    };

    let version = patterns.core_version(&contents);
    if version.is_none() {
        tracing::warn!("no core version declared in {}", path.display());
    }
    version
}

/// Candidate module directories under `contrib_dir`.
///
/// A missing contrib directory yields no modules.
pub fn discover_modules(contrib_dir: &Path, order: ModuleOrder) -> Vec<(String, PathBuf)> {
    if !contrib_dir.is_dir() {
        tracing::warn!(
            "contrib module directory not found: {}",
            contrib_dir.display()
        );
        return Vec::new();
    }

    match list_subdirs(contrib_dir, order == ModuleOrder::Sorted) {
        Ok(dirs) => dirs,
        Err(e) => {
            tracing::warn!("{:#}", e);
            Vec::new()
        }
    }
}

/// Build the project record for one module directory.
///
/// `.info` files are consulted in name order and the first one yielding a
/// version wins. When none does, [`UnversionedPolicy::Include`] keeps the
/// module with an empty version and the name from its first `.info` file.
pub fn scan_module(
    machine_name: &str,
    dir: &Path,
    patterns: &VersionPatterns,
    policy: UnversionedPolicy,
) -> ModuleScan {
    let info_files: Vec<PathBuf> = match list_files(dir, true) {
        Ok(files) => files
            .into_iter()
            .filter(|(name, _)| is_info_file(name))
            .map(|(_, path)| path)
            .collect(),
        Err(e) => {
            tracing::warn!("{:#}", e);
            return ModuleScan::Skipped(SkipReason::Unreadable);
        }
    };

    if info_files.is_empty() {
        return ModuleScan::Skipped(SkipReason::NoInfoFile);
    }

    let mut fallback_name = None;
    for path in &info_files {
        let contents = read_optional(path).unwrap_or_default();
        let friendly_name = patterns.friendly_name(&contents).unwrap_or_default();

        if let Some(version) = patterns.module_version(&contents) {
            return ModuleScan::Found(ProjectInfo::new(machine_name, friendly_name, version));
        }

        fallback_name.get_or_insert(friendly_name);
    }

    match policy {
        UnversionedPolicy::Include => ModuleScan::Found(ProjectInfo::new(
            machine_name,
            fallback_name.unwrap_or_default(),
            "",
        )),
        UnversionedPolicy::Skip => ModuleScan::Skipped(SkipReason::NoVersion),
    }
}
