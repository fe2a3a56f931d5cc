//! Python environment inspection.
//!
//! Answers whether the current Python interpreter runs inside a virtual
//! environment, where that interpreter lives, and where its packages are
//! installed.
//!
//! - [`inspector`] - The [`EnvironmentInspector`] trait and [`SystemInspector`]
//! - [`report`] - A serializable snapshot used by `construct status`

pub mod inspector;
pub mod report;

pub use inspector::{
    is_executable, parse_system_path, resolve_tool_path, EnvironmentInspector, SystemInspector,
};
pub use report::EnvironmentReport;
