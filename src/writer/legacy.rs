//! drush make ini-style format.
//!
//! ```text
//! core = 7.x
//! defaults[projects][subdir] = contrib
//!
//! api = 2
//!
//! projects[drupal][type] = "core"
//! projects[drupal][subdir] = ""
//! projects[drupal][directory_name] = ""
//! projects[drupal][version] = "7.89"
//! projects[drupal][patch][] = "patches/core/fix.patch"
//!
//! projects[views][version]  = "3.24"
//!
//! ```

use std::io::{self, Write};

use crate::core::patch::{core_patch_path, module_patch_path};
use crate::core::project::CORE_MACHINE_NAME;
use crate::core::{PatchSet, ProjectInfo};
use crate::writer::{Format, ManifestWriter, WriterSettings};

/// Writes the ini-like make file format.
#[derive(Debug, Clone)]
pub struct LegacyWriter {
    settings: WriterSettings,
}

impl LegacyWriter {
    pub fn new(settings: WriterSettings) -> Self {
        LegacyWriter { settings }
    }
}

impl ManifestWriter for LegacyWriter {
    fn format(&self) -> Format {
        Format::Legacy
    }

    fn write_preface(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "core = {}", self.settings.core_compatibility)?;
        writeln!(out, "defaults[projects][subdir] = contrib")?;
        writeln!(out)?;
        writeln!(out, "api = 2")?;
        writeln!(out)
    }

    fn write_core(
        &self,
        out: &mut dyn Write,
        version: &str,
        patches: &PatchSet,
    ) -> io::Result<()> {
        let p = format!("projects[{}]", CORE_MACHINE_NAME);
        writeln!(out, "{}[type] = \"core\"", p)?;
        writeln!(out, "{}[subdir] = \"\"", p)?;
        writeln!(out, "{}[directory_name] = \"\"", p)?;
        writeln!(out, "{}[version] = \"{}\"", p, version)?;

        self.write_patches(
            out,
            patches,
            CORE_MACHINE_NAME,
            &core_patch_path(&self.settings.patch_root),
        )?;

        writeln!(out)
    }

    fn write_module(
        &self,
        out: &mut dyn Write,
        project: &ProjectInfo,
        version: &str,
        patches: &PatchSet,
    ) -> io::Result<()> {
        let name = project.machine_name();
        // Two spaces before `=` match the files this tool has always produced.
        writeln!(out, "projects[{}][version]  = \"{}\"", name, version)?;

        self.write_patches(
            out,
            patches,
            name,
            &module_patch_path(&self.settings.patch_root, name),
        )?;

        writeln!(out)
    }

    fn write_patches(
        &self,
        out: &mut dyn Write,
        patches: &PatchSet,
        project: &str,
        path: &str,
    ) -> io::Result<()> {
        for file in patches.patches() {
            writeln!(out, "projects[{}][patch][] = \"{}/{}\"", project, path, file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::test_util::render;

    fn writer() -> LegacyWriter {
        LegacyWriter::new(WriterSettings::default())
    }

    #[test]
    fn test_preface() {
        let output = render(|out| writer().write_preface(out));
        assert_eq!(
            output,
            "core = 7.x\ndefaults[projects][subdir] = contrib\n\napi = 2\n\n"
        );
    }

    #[test]
    fn test_core_block() {
        let output = render(|out| writer().write_core(out, "7.89", &PatchSet::empty()));
        assert_eq!(
            output,
            "projects[drupal][type] = \"core\"\n\
             projects[drupal][subdir] = \"\"\n\
             projects[drupal][directory_name] = \"\"\n\
             projects[drupal][version] = \"7.89\"\n\
             \n"
        );
    }

    #[test]
    fn test_core_block_with_patches() {
        let patches: PatchSet = [".", "..", "core-1.patch"].into_iter().collect();
        let output = render(|out| writer().write_core(out, "7.89", &patches));

        assert!(output.contains(
            "projects[drupal][version] = \"7.89\"\n\
             projects[drupal][patch][] = \"patches/core/core-1.patch\"\n\n"
        ));
        assert!(!output.contains("patches/core/.\""));
    }

    #[test]
    fn test_module_block() {
        let project = ProjectInfo::new("foo", "Foo Module", "2.3");
        let patches: PatchSet = ["fix.patch"].into_iter().collect();
        let output = render(|out| writer().write_module(out, &project, "2.3", &patches));

        assert_eq!(
            output,
            "projects[foo][version]  = \"2.3\"\n\
             projects[foo][patch][] = \"patches/contrib/foo/fix.patch\"\n\
             \n"
        );
    }

    #[test]
    fn test_empty_version_renders_empty_field() {
        let project = ProjectInfo::new("foo", "", "");
        let output = render(|out| writer().write_module(out, &project, "", &PatchSet::empty()));
        assert_eq!(output, "projects[foo][version]  = \"\"\n\n");
    }

    #[test]
    fn test_write_patches_skips_non_patches() {
        let patches: PatchSet = [".", "..", "README.md", "a.patch"].into_iter().collect();
        let output = render(|out| writer().write_patches(out, &patches, "views", "p/views"));
        assert_eq!(output, "projects[views][patch][] = \"p/views/a.patch\"\n");
    }

    #[test]
    fn test_write_patches_empty() {
        let output =
            render(|out| writer().write_patches(out, &PatchSet::empty(), "views", "p/views"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_custom_settings() {
        let writer = LegacyWriter::new(WriterSettings {
            core_compatibility: "6.x".to_string(),
            patch_root: "build/patches".to_string(),
        });
        let patches: PatchSet = ["x.patch"].into_iter().collect();

        let output = render(|out| {
            writer.write_preface(out)?;
            writer.write_core(out, "6.38", &patches)
        });
        assert!(output.starts_with("core = 6.x\n"));
        assert!(output.contains("\"build/patches/core/x.patch\""));
    }
}
