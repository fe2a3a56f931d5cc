//! Typed configuration read by `construct oracle`.

use std::fmt;
use std::path::Path;

use crate::error::{ConstructError, Result};

use super::ConfigSource;

/// Name of the env file looked up in the project root.
pub const ENV_FILE_NAME: &str = ".env";

/// Variables that must be present and non-empty, in report order.
pub const REQUIRED_VARIABLES: &[&str] = &[
    "MATRIX_MODE",
    "DATABASE_URL",
    "API_KEY",
    "LOG_LEVEL",
    "ZION_ENDPOINT",
];

/// Configuration built once at startup and passed to consumers.
#[derive(Clone, PartialEq, Eq)]
pub struct MatrixConfig {
    pub mode: String,
    pub database_url: String,
    pub api_key: String,
    pub log_level: String,
    pub zion_endpoint: String,
}

impl MatrixConfig {
    /// Read every required variable from `source`.
    ///
    /// Absent and empty values both count as missing; all missing names are
    /// reported together in [`REQUIRED_VARIABLES`] order.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let lookup = |name: &str| {
            source
                .get(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let missing: Vec<String> = REQUIRED_VARIABLES
            .iter()
            .filter(|&&name| lookup(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConstructError::MissingConfiguration { names: missing });
        }

        let required = |name: &str| lookup(name).unwrap_or_default();
        Ok(Self {
            mode: required("MATRIX_MODE"),
            database_url: required("DATABASE_URL"),
            api_key: required("API_KEY"),
            log_level: required("LOG_LEVEL"),
            zion_endpoint: required("ZION_ENDPOINT"),
        })
    }
}

// Credentials stay out of debug logs.
impl fmt::Debug for MatrixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixConfig")
            .field("mode", &self.mode)
            .field("database_url", &"***")
            .field("api_key", &"***")
            .field("log_level", &self.log_level)
            .field("zion_endpoint", &self.zion_endpoint)
            .finish()
    }
}

/// Whether an env file exists in `project_root`.
pub fn env_file_present(project_root: &Path) -> bool {
    project_root.join(ENV_FILE_NAME).is_file()
}
