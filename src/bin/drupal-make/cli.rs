//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use drupal_make::ops::{ModuleOrder, UnversionedPolicy};
use drupal_make::{Config, Format};

/// drupal-make - Generate a drush make file from an existing Drupal site
#[derive(Parser, Debug)]
#[command(name = "drupal-make")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Format markers: a token containing `yml` selects YAML, one containing
    /// `csv` selects CSV, anything else keeps the legacy format. Dashed
    /// markers such as `--yml` are accepted; flags must come before them.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub tokens: Vec<String>,

    /// Output format (overrides format markers)
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Drupal docroot
    #[arg(long, env = "DRUPAL_MAKE_DOCROOT")]
    pub docroot: Option<PathBuf>,

    /// Patch storage root
    #[arg(long, env = "DRUPAL_MAKE_PATCHES")]
    pub patches: Option<PathBuf>,

    /// Contributed module directory (defaults to <docroot>/sites/all/modules/contrib)
    #[arg(long)]
    pub contrib: Option<PathBuf>,

    /// Patch directory as written into the manifest
    #[arg(long)]
    pub patch_prefix: Option<String>,

    /// Core compatibility branch
    #[arg(long, value_name = "BRANCH")]
    pub core: Option<String>,

    /// Keep filesystem order instead of sorting modules by name
    #[arg(long)]
    pub scan_order: bool,

    /// Leave out modules whose version cannot be determined
    #[arg(long)]
    pub skip_unversioned: bool,

    /// Additional config file, applied over global and project config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The format requested on the command line, if any.
    pub fn requested_format(&self) -> Option<Format> {
        self.format.or_else(|| Format::from_tokens(self.tokens.as_slice()))
    }

    /// Apply command-line overrides on top of file configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(format) = self.requested_format() {
            config.manifest.format = Some(format);
        }
        if let Some(docroot) = &self.docroot {
            config.paths.docroot = Some(docroot.clone());
        }
        if let Some(patches) = &self.patches {
            config.paths.patches = Some(patches.clone());
        }
        if let Some(contrib) = &self.contrib {
            config.paths.contrib = Some(contrib.clone());
        }
        if let Some(prefix) = &self.patch_prefix {
            config.manifest.patch_prefix = Some(prefix.clone());
        }
        if let Some(core) = &self.core {
            config.manifest.core = Some(core.clone());
        }
        if self.scan_order {
            config.manifest.module_order = Some(ModuleOrder::Scan);
        }
        if self.skip_unversioned {
            config.manifest.unversioned = Some(UnversionedPolicy::Skip);
        }
    }
}
