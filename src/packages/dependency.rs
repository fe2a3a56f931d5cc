//! Required package checks.

use serde::Serialize;
use tracing::debug;

use crate::error::{ConstructError, Result};

use super::PackageRegistry;

/// A package the analysis needs, and what it is needed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Distribution name.
    pub name: &'static str,
    /// Human-readable purpose shown in the check output.
    pub purpose: &'static str,
}

/// Packages checked by `construct loading`, in report order.
pub const REQUIRED_DEPENDENCIES: &[Dependency] = &[
    Dependency {
        name: "pandas",
        purpose: "Data manipulation ready",
    },
    Dependency {
        name: "numpy",
        purpose: "Numerical computations ready",
    },
    Dependency {
        name: "matplotlib",
        purpose: "Visualization ready",
    },
];

/// Result of checking one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyStatus {
    /// Distribution name.
    pub name: String,
    /// What the package is needed for.
    pub purpose: String,
    /// Installed version, or `None` when missing.
    pub version: Option<String>,
}

impl DependencyStatus {
    /// Whether the package is installed.
    pub fn is_installed(&self) -> bool {
        self.version.is_some()
    }

    /// Report line for this dependency.
    pub fn line(&self) -> String {
        match &self.version {
            Some(version) => format!("[OK] {} ({}) - {}", self.name, version, self.purpose),
            None => format!(
                "[ERROR] {} is missing. Required for: {}",
                self.name, self.purpose
            ),
        }
    }
}

/// Results of checking a set of dependencies, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// One entry per checked dependency.
    pub statuses: Vec<DependencyStatus>,
}

impl DependencyReport {
    /// Whether every dependency is installed.
    pub fn all_installed(&self) -> bool {
        self.statuses.iter().all(DependencyStatus::is_installed)
    }

    /// Names of missing dependencies, in check order.
    pub fn missing(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|s| !s.is_installed())
            .map(|s| s.name.clone())
            .collect()
    }

    /// `Ok` when everything is installed, else [`ConstructError::MissingDependencies`].
    pub fn ensure_installed(&self) -> Result<()> {
        if self.all_installed() {
            Ok(())
        } else {
            Err(ConstructError::MissingDependencies {
                names: self.missing(),
            })
        }
    }
}

/// Look up every dependency in the registry.
pub fn check_dependencies(
    registry: &dyn PackageRegistry,
    dependencies: &[Dependency],
) -> DependencyReport {
    let statuses = dependencies
        .iter()
        .map(|dep| {
            let version = registry.installed_version(dep.name);
            debug!("Dependency {}: {:?}", dep.name, version);
            DependencyStatus {
                name: dep.name.to_string(),
                purpose: dep.purpose.to_string(),
                version,
            }
        })
        .collect();

    DependencyReport { statuses }
}
