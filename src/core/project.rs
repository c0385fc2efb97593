//! Project identification - WHAT is being built (core or a contributed module).

use std::fmt;

/// Machine name used for Drupal core in every manifest format.
pub const CORE_MACHINE_NAME: &str = "drupal";

/// Display name used for Drupal core in the tabular format.
pub const CORE_FRIENDLY_NAME: &str = "Drupal";

/// A discovered project.
///
/// Constructed once per project during a scan and never modified. The
/// version and friendly name may be empty when the metadata could not be
/// read; writers render them as empty fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    machine_name: String,
    friendly_name: String,
    version: String,
}

impl ProjectInfo {
    /// Create a new project record.
    pub fn new(
        machine_name: impl Into<String>,
        friendly_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let machine_name = machine_name.into();
        debug_assert!(!machine_name.is_empty(), "machine name must not be empty");

        ProjectInfo {
            machine_name,
            friendly_name: friendly_name.into(),
            version: version.into(),
        }
    }

    /// The Drupal core project at the given version.
    pub fn core(version: impl Into<String>) -> Self {
        ProjectInfo::new(CORE_MACHINE_NAME, CORE_FRIENDLY_NAME, version)
    }

    /// Directory-derived project slug.
    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    /// Human-readable name from the `.info` file.
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether a version was discovered for this project.
    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }
}

impl fmt::Display for ProjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.machine_name)
        } else {
            write!(f, "{} {}", self.machine_name, self.version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_accessors() {
        let project = ProjectInfo::new("views", "Views", "3.24");
        assert_eq!(project.machine_name(), "views");
        assert_eq!(project.friendly_name(), "Views");
        assert_eq!(project.version(), "3.24");
        assert!(project.has_version());
    }

    #[test]
    fn test_empty_fields_are_valid() {
        let project = ProjectInfo::new("mystery", "", "");
        assert_eq!(project.friendly_name(), "");
        assert!(!project.has_version());
        assert_eq!(project.to_string(), "mystery");
    }

    #[test]
    fn test_core_project() {
        let core = ProjectInfo::core("7.89");
        assert_eq!(core.machine_name(), "drupal");
        assert_eq!(core.friendly_name(), "Drupal");
        assert_eq!(core.to_string(), "drupal 7.89");
    }
}
