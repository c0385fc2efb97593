//! drush make YAML format.
//!
//! Indentation is significant and fixed at two spaces per level:
//!
//! ```text
//! core: '7.x'
//! api: 2
//! defaults:
//!   projects:
//!     subdir: 'contrib'
//!
//! projects:
//!   drupal:
//!     version: '7.89'
//!     patch:
//!       - 'patches/core/fix.patch'
//!   views:
//!     version: '3.24'
//! ```

use std::borrow::Cow;
use std::io::{self, Write};

use crate::core::patch::{core_patch_path, module_patch_path};
use crate::core::project::CORE_MACHINE_NAME;
use crate::core::{PatchSet, ProjectInfo};
use crate::writer::{Format, ManifestWriter, WriterSettings};

/// Writes the YAML make file format.
#[derive(Debug, Clone)]
pub struct YmlWriter {
    settings: WriterSettings,
}

impl YmlWriter {
    pub fn new(settings: WriterSettings) -> Self {
        YmlWriter { settings }
    }

    fn write_project(
        &self,
        out: &mut dyn Write,
        name: &str,
        version: &str,
        patches: &PatchSet,
        patch_path: &str,
    ) -> io::Result<()> {
        writeln!(out, "  {}:", key(name))?;
        writeln!(out, "    version: {}", quote(version))?;
        self.write_patches(out, patches, name, patch_path)
    }
}

/// Single-quote a YAML scalar so empty and numeric-looking values stay strings.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// A mapping key: plain machine names stay bare, anything else is quoted.
fn key(name: &str) -> Cow<'_, str> {
    let plain = !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(quote(name))
    }
}

impl ManifestWriter for YmlWriter {
    fn format(&self) -> Format {
        Format::Yml
    }

    fn write_preface(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "core: {}", quote(&self.settings.core_compatibility))?;
        writeln!(out, "api: 2")?;
        writeln!(out, "defaults:")?;
        writeln!(out, "  projects:")?;
        writeln!(out, "    subdir: 'contrib'")?;
        writeln!(out)?;
        writeln!(out, "projects:")
    }

    fn write_core(
        &self,
        out: &mut dyn Write,
        version: &str,
        patches: &PatchSet,
    ) -> io::Result<()> {
        self.write_project(
            out,
            CORE_MACHINE_NAME,
            version,
            patches,
            &core_patch_path(&self.settings.patch_root),
        )
    }

    fn write_module(
        &self,
        out: &mut dyn Write,
        project: &ProjectInfo,
        version: &str,
        patches: &PatchSet,
    ) -> io::Result<()> {
        let name = project.machine_name();
        self.write_project(
            out,
            name,
            version,
            patches,
            &module_patch_path(&self.settings.patch_root, name),
        )
    }

    fn write_patches(
        &self,
        out: &mut dyn Write,
        patches: &PatchSet,
        _project: &str,
        path: &str,
    ) -> io::Result<()> {
        // An empty `patch:` key would parse as null, so omit it entirely.
        if !patches.has_patches() {
            return Ok(());
        }

        writeln!(out, "    patch:")?;
        for file in patches.patches() {
            writeln!(out, "      - {}", quote(&format!("{}/{}", path, file)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::test_util::render;

    fn writer() -> YmlWriter {
        YmlWriter::new(WriterSettings::default())
    }

    #[test]
    fn test_preface() {
        let output = render(|out| writer().write_preface(out));
        assert_eq!(
            output,
            "core: '7.x'\napi: 2\ndefaults:\n  projects:\n    subdir: 'contrib'\n\nprojects:\n"
        );
    }

    #[test]
    fn test_core_without_patches_omits_patch_key() {
        let output = render(|out| writer().write_core(out, "7.89", &PatchSet::empty()));
        assert_eq!(output, "  drupal:\n    version: '7.89'\n");
    }

    #[test]
    fn test_only_non_patch_entries_omits_patch_key() {
        let patches: PatchSet = [".", "..", "README.txt"].into_iter().collect();
        let output = render(|out| writer().write_core(out, "7.89", &patches));
        assert!(!output.contains("patch:"));
    }

    #[test]
    fn test_module_with_patches() {
        let project = ProjectInfo::new("foo", "Foo Module", "2.3");
        let patches: PatchSet = [".", "..", "a.patch", "b.patch"].into_iter().collect();
        let output = render(|out| writer().write_module(out, &project, "2.3", &patches));

        assert_eq!(
            output,
            "  foo:\n\
             \x20   version: '2.3'\n\
             \x20   patch:\n\
             \x20     - 'patches/contrib/foo/a.patch'\n\
             \x20     - 'patches/contrib/foo/b.patch'\n"
        );
    }

    #[test]
    fn test_empty_version_is_quoted() {
        let project = ProjectInfo::new("foo", "", "");
        let output = render(|out| writer().write_module(out, &project, "", &PatchSet::empty()));
        assert_eq!(output, "  foo:\n    version: ''\n");
    }

    #[test]
    fn test_quote_escapes_single_quotes() {
        assert_eq!(quote("it's"), "'it''s'");
        assert_eq!(quote("7.10"), "'7.10'");
    }

    #[test]
    fn test_unusual_machine_names_are_quoted_keys() {
        assert_eq!(key("views_ui"), "views_ui");
        assert_eq!(key("my-module"), "my-module");
        assert_eq!(key("weird:name"), "'weird:name'");
        assert_eq!(key("&anchor"), "'&anchor'");
        assert_eq!(key("-dash"), "'-dash'");

        let project = ProjectInfo::new("a #b", "", "1.0");
        let output = render(|out| {
            writer().write_preface(out)?;
            writer().write_module(out, &project, "1.0", &PatchSet::empty())
        });
        assert!(output.ends_with("  'a #b':\n    version: '1.0'\n"));

        let doc: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(doc["projects"]["a #b"]["version"].as_str(), Some("1.0"));
    }

    #[test]
    fn test_output_is_valid_yaml() {
        let w = writer();
        let foo = ProjectInfo::new("foo", "Foo", "2.3");
        let bar = ProjectInfo::new("bar", "", "");
        let core_patches: PatchSet = ["core.patch"].into_iter().collect();
        let foo_patches: PatchSet = ["fix.patch", "notes.txt"].into_iter().collect();

        let output = render(|out| {
            w.write_preface(out)?;
            w.write_core(out, "7.10", &core_patches)?;
            w.write_module(out, &foo, "2.3", &foo_patches)?;
            w.write_module(out, &bar, "", &PatchSet::empty())
        });

        let doc: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(doc["core"].as_str(), Some("7.x"));
        assert_eq!(doc["api"].as_u64(), Some(2));
        assert_eq!(doc["defaults"]["projects"]["subdir"].as_str(), Some("contrib"));
        assert_eq!(doc["projects"]["drupal"]["version"].as_str(), Some("7.10"));
        assert_eq!(
            doc["projects"]["drupal"]["patch"][0].as_str(),
            Some("patches/core/core.patch")
        );
        assert_eq!(
            doc["projects"]["foo"]["patch"].as_sequence().map(|s| s.len()),
            Some(1)
        );
        assert_eq!(doc["projects"]["bar"]["version"].as_str(), Some(""));
        assert!(doc["projects"]["bar"].get("patch").is_none());
    }
}
