//! Semicolon-separated project listing.
//!
//! One row per project, no header and no patches:
//!
//! ```text
//! "Drupal";"7.89";"https://drupal.org/project/drupal"
//! "Views";"3.24";"https://drupal.org/project/views"
//! ```

use std::io::{self, Write};

use crate::core::project::{CORE_FRIENDLY_NAME, CORE_MACHINE_NAME};
use crate::core::{PatchSet, ProjectInfo};
use crate::writer::{Format, ManifestWriter};

/// Base URL for project pages on drupal.org.
pub const PROJECT_URL_BASE: &str = "https://drupal.org/project/";

/// Writes a project listing for spreadsheets and audits.
#[derive(Debug, Clone, Default)]
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        CsvWriter
    }

    fn write_row(
        &self,
        out: &mut dyn Write,
        friendly_name: &str,
        version: &str,
        machine_name: &str,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{};{};{}",
            quote(friendly_name),
            quote(version),
            quote(&project_url(machine_name))
        )
    }
}

/// drupal.org project page for a machine name.
pub fn project_url(machine_name: &str) -> String {
    format!("{}{}", PROJECT_URL_BASE, machine_name)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

impl ManifestWriter for CsvWriter {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn write_preface(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn write_core(
        &self,
        out: &mut dyn Write,
        version: &str,
        _patches: &PatchSet,
    ) -> io::Result<()> {
        self.write_row(out, CORE_FRIENDLY_NAME, version, CORE_MACHINE_NAME)
    }

    fn write_module(
        &self,
        out: &mut dyn Write,
        project: &ProjectInfo,
        version: &str,
        _patches: &PatchSet,
    ) -> io::Result<()> {
        self.write_row(out, project.friendly_name(), version, project.machine_name())
    }

    fn write_patches(
        &self,
        _out: &mut dyn Write,
        _patches: &PatchSet,
        _project: &str,
        _path: &str,
    ) -> io::Result<()> {
        Ok(())
    }
}
