//! Snapshot of an inspected environment.

use std::path::PathBuf;

use serde::Serialize;

use super::EnvironmentInspector;

/// Everything `construct status` shows, gathered once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentReport {
    /// Whether the interpreter belongs to a virtual environment.
    pub is_virtual_environment: bool,
    /// Interpreter executable, if found.
    pub interpreter: Option<PathBuf>,
    /// Installation prefix, if known.
    pub prefix: Option<PathBuf>,
    /// Name of the virtual environment (last component of the prefix).
    pub environment_name: Option<String>,
    /// Package install directories.
    pub package_install_paths: Vec<PathBuf>,
}

impl EnvironmentReport {
    /// Collect a report from an inspector.
    pub fn inspect(inspector: &dyn EnvironmentInspector) -> Self {
        let is_virtual_environment = inspector.is_virtual_environment();
        let prefix = inspector.current_prefix_path();
        let environment_name = if is_virtual_environment {
            prefix
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
        } else {
            None
        };

        Self {
            is_virtual_environment,
            interpreter: inspector.current_interpreter_path(),
            prefix,
            environment_name,
            package_install_paths: inspector.package_install_paths(),
        }
    }

    /// Interpreter path for display, or `not found`.
    pub fn interpreter_display(&self) -> String {
        self.interpreter
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "not found".to_string())
    }
}
