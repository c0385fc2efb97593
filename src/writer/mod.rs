//! Manifest writers.
//!
//! A [`ManifestWriter`] renders the scan results into one make file format.
//! The writer is chosen once per run and driven through a trait object, so
//! the orchestrator never branches on the format itself.
//!
//! Writers hold only their construction settings. Every operation appends to
//! the output stream passed in and changes no state, so the same writer can
//! render any number of manifests.

pub mod csv;
pub mod legacy;
pub mod yml;

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{PatchSet, ProjectInfo};
use crate::util::config::{ConfigError, DEFAULT_CORE, DEFAULT_PATCH_ROOT};

pub use csv::CsvWriter;
pub use legacy::LegacyWriter;
pub use yml::YmlWriter;

/// Output format of the generated make file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// drush make ini-style format
    #[default]
    Legacy,
    /// drush make YAML format
    #[serde(alias = "yaml")]
    Yml,
    /// Semicolon-separated project listing (no patches)
    Csv,
}

impl Format {
    /// Pick a format from free-form command-line tokens.
    ///
    /// Any token containing `yml` selects [`Format::Yml`]; otherwise any
    /// token containing `csv` selects [`Format::Csv`]. Returns `None` when
    /// no token carries a marker.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Option<Format> {
        if tokens.iter().any(|t| t.as_ref().contains("yml")) {
            Some(Format::Yml)
        } else if tokens.iter().any(|t| t.as_ref().contains("csv")) {
            Some(Format::Csv)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Legacy => "legacy",
            Format::Yml => "yml",
            Format::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "make" | "ini" => Ok(Format::Legacy),
            "yml" | "yaml" => Ok(Format::Yml),
            "csv" => Ok(Format::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// Settings shared by all writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSettings {
    /// Core compatibility branch written into the preface (e.g. `7.x`)
    pub core_compatibility: String,

    /// Patch root as it should appear in the manifest (e.g. `patches`)
    pub patch_root: String,
}

impl Default for WriterSettings {
    fn default() -> Self {
        WriterSettings {
            core_compatibility: DEFAULT_CORE.to_string(),
            patch_root: DEFAULT_PATCH_ROOT.to_string(),
        }
    }
}

/// Renders projects and their patches into one make file format.
pub trait ManifestWriter {
    /// The format this writer produces.
    fn format(&self) -> Format;

    /// Write the format header. Called once, before any project.
    fn write_preface(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Write the Drupal core entry. `version` may be empty.
    fn write_core(&self, out: &mut dyn Write, version: &str, patches: &PatchSet)
        -> io::Result<()>;

    /// Write one contributed module entry. `version` may be empty.
    fn write_module(
        &self,
        out: &mut dyn Write,
        project: &ProjectInfo,
        version: &str,
        patches: &PatchSet,
    ) -> io::Result<()>;

    /// Write one line per recognized patch in `patches`, referencing
    /// `path/<file>`. Non-patch entries are skipped.
    fn write_patches(
        &self,
        out: &mut dyn Write,
        patches: &PatchSet,
        project: &str,
        path: &str,
    ) -> io::Result<()>;
}

/// Create the writer for a format.
pub fn writer_for(format: Format, settings: WriterSettings) -> Box<dyn ManifestWriter> {
    match format {
        Format::Legacy => Box::new(LegacyWriter::new(settings)),
        Format::Yml => Box::new(YmlWriter::new(settings)),
        Format::Csv => Box::new(CsvWriter::new()),
    }
}
