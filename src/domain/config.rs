use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::EnrollmentLimit;

/// Configuration for a [`Registrar`](crate::Registrar).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The enrollment limit given to newly added courses.
    ///
    /// If this is `None`, new courses have no limit until one is set.
    default_enrollment_limit: Option<usize>,

    /// Whether to re-check every membership invariant after each change and
    /// log any breach at `error` level.
    ///
    /// This walks every student and course, so it is intended for debugging
    /// and tests rather than large registries.
    pub audit_invariants: bool,
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The enrollment limit new courses start with.
    #[must_use]
    pub fn default_enrollment_limit(&self) -> EnrollmentLimit {
        self.default_enrollment_limit
            .map_or(EnrollmentLimit::UNLIMITED, EnrollmentLimit::new)
    }

    /// Sets the enrollment limit new courses start with.
    ///
    /// Courses that already exist keep their current limit.
    pub const fn set_default_enrollment_limit(&mut self, limit: Option<usize>) {
        self.default_enrollment_limit = limit;
    }
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_enrollment_limit: Option<usize>,

        #[serde(default)]
        audit_invariants: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_enrollment_limit,
                audit_invariants,
            } => Self {
                default_enrollment_limit,
                audit_invariants,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_enrollment_limit: config.default_enrollment_limit,
            audit_invariants: config.audit_invariants,
        }
    }
}
