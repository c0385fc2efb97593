//! Version and name extraction from Drupal metadata files.
//!
//! Two kinds of files are consulted:
//! - `includes/bootstrap.inc` in the docroot, which declares the core version
//!   as `define('VERSION', '7.89');`
//! - a module's `.info` file, which carries `name = "..."` and, for packaged
//!   releases, `version = "7.x-2.3"`.
//!
//! Every extractor returns `None` when its declaration is absent. Callers
//! treat that as an empty field, never as an error.

use regex::Regex;

use crate::util::config::ConfigError;

/// Marker a file name must contain to be treated as module metadata.
pub const INFO_MARKER: &str = ".info";

/// Check whether a file name refers to a module `.info` file.
pub fn is_info_file(name: &str) -> bool {
    matches!(name.find(INFO_MARKER), Some(pos) if pos > 0)
}

/// Compiled patterns for one core compatibility branch (e.g. `7.x`).
#[derive(Debug, Clone)]
pub struct VersionPatterns {
    compatibility: String,
    core_version: Regex,
    module_version: Regex,
    friendly_name: Regex,
}

impl VersionPatterns {
    /// Build the patterns for the given core compatibility string.
    pub fn new(compatibility: &str) -> Result<Self, ConfigError> {
        if !is_valid_compatibility(compatibility) {
            return Err(ConfigError::InvalidCoreCompatibility(
                compatibility.to_string(),
            ));
        }

        let core_version = Regex::new(r"define\(\s*'VERSION'\s*,\s*'(\d+\.\d+)'\s*\);")
            .map_err(ConfigError::Pattern)?;

        let module_version = Regex::new(&format!(
            r#"(?m)^\s*version\s*=\s*"?{}-(\d+\.\d+(?:-[a-zA-Z0-9]+)?)"?"#,
            regex::escape(compatibility)
        ))
        .map_err(ConfigError::Pattern)?;

        let friendly_name = Regex::new(r#"(?m)^\s*name\s*=\s*"?([^"\r\n]*?)"?\s*$"#)
            .map_err(ConfigError::Pattern)?;

        Ok(VersionPatterns {
            compatibility: compatibility.to_string(),
            core_version,
            module_version,
            friendly_name,
        })
    }

    /// The core compatibility branch these patterns target.
    pub fn compatibility(&self) -> &str {
        &self.compatibility
    }

    /// Extract the core version from the contents of `bootstrap.inc`.
    pub fn core_version(&self, contents: &str) -> Option<String> {
        capture(&self.core_version, contents)
    }

    /// Extract the module version (without the branch prefix) from `.info` contents.
    pub fn module_version(&self, contents: &str) -> Option<String> {
        capture(&self.module_version, contents)
    }

    /// Extract the human-readable module name from `.info` contents.
    pub fn friendly_name(&self, contents: &str) -> Option<String> {
        capture(&self.friendly_name, contents)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

fn capture(re: &Regex, contents: &str) -> Option<String> {
    re.captures(contents)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Core compatibility strings look like `7.x`.
fn is_valid_compatibility(s: &str) -> bool {
    match s.split_once('.') {
        Some((major, "x")) => !major.is_empty() && major.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}
