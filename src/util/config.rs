//! Configuration file support for drupal-make.
//!
//! Two configuration file locations are consulted:
//! - Global: `~/.drupal-make/config.toml` - User-wide defaults
//! - Project: `drupal-make.toml` - Site-specific overrides in the working directory
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::VersionPatterns;
use crate::ops::generate::{GenerateOptions, ModuleOrder, UnversionedPolicy};
use crate::util::fs::display_path;
use crate::writer::Format;

/// Default docroot, relative to the working directory.
pub const DEFAULT_DOCROOT: &str = "docroot";

/// Default patch storage root, relative to the working directory.
pub const DEFAULT_PATCH_ROOT: &str = "patches";

/// Default core compatibility branch.
pub const DEFAULT_CORE: &str = "7.x";

/// Contributed module directory, relative to the docroot.
pub const CONTRIB_SUBDIR: &str = "sites/all/modules/contrib";

/// Project config file name.
pub const PROJECT_CONFIG_NAME: &str = "drupal-make.toml";

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid format `{0}`; expected `legacy`, `yml`, or `csv`")]
    InvalidFormat(String),

    #[error("invalid module order `{0}`; expected `sorted` or `scan`")]
    InvalidModuleOrder(String),

    #[error("invalid unversioned policy `{0}`; expected `include` or `skip`")]
    InvalidUnversionedPolicy(String),

    #[error("invalid core compatibility `{0}`; expected a branch such as `7.x`")]
    InvalidCoreCompatibility(String),

    #[error("failed to compile version pattern")]
    Pattern(#[source] regex::Error),
}

/// drupal-make configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input locations
    pub paths: PathsConfig,

    /// Output settings
    pub manifest: ManifestConfig,
}

/// Locations of the site being scanned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Drupal docroot (defaults to `docroot`)
    pub docroot: Option<PathBuf>,

    /// Patch storage root (defaults to `patches`)
    pub patches: Option<PathBuf>,

    /// Contributed module directory (defaults to `<docroot>/sites/all/modules/contrib`)
    pub contrib: Option<PathBuf>,
}

/// Manifest rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Output format
    pub format: Option<Format>,

    /// Core compatibility branch, e.g. `7.x`
    pub core: Option<String>,

    /// Order in which module directories are emitted
    pub module_order: Option<ModuleOrder>,

    /// What to do with modules whose version cannot be determined
    pub unversioned: Option<UnversionedPolicy>,

    /// Patch directory as written into the manifest (defaults to the patch root)
    pub patch_prefix: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.paths.docroot.is_some() {
            self.paths.docroot = other.paths.docroot;
        }
        if other.paths.patches.is_some() {
            self.paths.patches = other.paths.patches;
        }
        if other.paths.contrib.is_some() {
            self.paths.contrib = other.paths.contrib;
        }

        if other.manifest.format.is_some() {
            self.manifest.format = other.manifest.format;
        }
        if other.manifest.core.is_some() {
            self.manifest.core = other.manifest.core;
        }
        if other.manifest.module_order.is_some() {
            self.manifest.module_order = other.manifest.module_order;
        }
        if other.manifest.unversioned.is_some() {
            self.manifest.unversioned = other.manifest.unversioned;
        }
        if other.manifest.patch_prefix.is_some() {
            self.manifest.patch_prefix = other.manifest.patch_prefix;
        }
    }

    /// Resolve into the explicit options used for one run, filling defaults.
    pub fn resolve(&self) -> Result<GenerateOptions, ConfigError> {
        let docroot = self
            .paths
            .docroot
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCROOT));
        let patch_root = self
            .paths
            .patches
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATCH_ROOT));
        let contrib_dir = self
            .paths
            .contrib
            .clone()
            .unwrap_or_else(|| docroot.join(CONTRIB_SUBDIR));

        let core = self
            .manifest
            .core
            .clone()
            .unwrap_or_else(|| DEFAULT_CORE.to_string());
        let patterns = VersionPatterns::new(&core)?;

        let patch_prefix = self
            .manifest
            .patch_prefix
            .clone()
            .unwrap_or_else(|| display_path(&patch_root));

        Ok(GenerateOptions {
            format: self.manifest.format.unwrap_or_default(),
            docroot,
            patch_root,
            patch_prefix,
            contrib_dir,
            patterns,
            module_order: self.manifest.module_order.unwrap_or_default(),
            unversioned: self.manifest.unversioned.unwrap_or_default(),
        })
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (drupal-make.toml)
/// 2. Global config (~/.drupal-make/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            tracing::debug!("loading global config from {}", global_path.display());
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        tracing::debug!("loading project config from {}", project_path.display());
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.drupal-make).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".drupal-make"))
}

/// Get the global config path (~/.drupal-make/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (drupal-make.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_NAME)
}
