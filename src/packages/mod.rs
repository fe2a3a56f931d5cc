//! Installed package lookup and dependency checks.
//!
//! - [`registry`] - [`PackageRegistry`] and the site-packages backed registry
//! - [`dependency`] - The packages `construct loading` requires, and the check

pub mod dependency;
pub mod registry;

pub use dependency::{
    check_dependencies, Dependency, DependencyReport, DependencyStatus, REQUIRED_DEPENDENCIES,
};
pub use registry::{normalize_name, PackageRegistry, SitePackagesRegistry};
