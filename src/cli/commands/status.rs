//! Status command implementation.
//!
//! The `construct status` command reports whether the Python interpreter
//! runs inside a virtual environment.

use crate::cli::args::StatusArgs;
use crate::environment::{EnvironmentInspector, EnvironmentReport, SystemInspector};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    args: StatusArgs,
    inspector: Option<Box<dyn EnvironmentInspector>>,
}

impl StatusCommand {
    /// Create a new status command that inspects the running system.
    pub fn new(args: StatusArgs) -> Self {
        Self {
            args,
            inspector: None,
        }
    }

    /// Use a specific inspector instead of the running system.
    pub fn with_inspector(mut self, inspector: Box<dyn EnvironmentInspector>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    fn report(&self) -> EnvironmentReport {
        match &self.inspector {
            Some(inspector) => EnvironmentReport::inspect(inspector.as_ref()),
            None => EnvironmentReport::inspect(&SystemInspector::detect()),
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.report();

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if report.is_virtual_environment {
            show_construct(ui, &report);
        } else {
            show_plugged_in(ui, &report);
        }

        Ok(CommandResult::success())
    }
}

fn show_construct(ui: &mut dyn UserInterface, report: &EnvironmentReport) {
    ui.show_header("MATRIX STATUS: Welcome to the construct");
    ui.message(&format!("Current Python: {}", report.interpreter_display()));
    ui.message(&format!(
        "Virtual Environment: {}",
        report.environment_name.as_deref().unwrap_or("unknown")
    ));
    if let Some(prefix) = &report.prefix {
        ui.message(&format!("Environment Path: {}", prefix.display()));
    }

    ui.message("");
    ui.success("SUCCESS: You're in an isolated environment!");
    ui.message("Safe to install packages without affecting");
    ui.message("the global system.");
    ui.message("");
    ui.message("Package installation path:");
    if let Some(path) = report.package_install_paths.first() {
        ui.message(&path.display().to_string());
    }
}

fn show_plugged_in(ui: &mut dyn UserInterface, report: &EnvironmentReport) {
    ui.show_header("MATRIX STATUS: You're still plugged in");
    ui.message(&format!("Current Python: {}", report.interpreter_display()));
    ui.message("Virtual Environment: None detected");

    ui.message("");
    ui.warning("WARNING: You're in the global environment!");
    ui.message("The machines can see everything you install.");
    ui.message("To enter the construct, run:");
    ui.message("python -m venv matrix_env");
    ui.message("source matrix_env/bin/activate # On Unix");
    ui.message("matrix_env\\Scripts\\activate # On Windows");
    ui.message("");
    ui.message("Then run this program again.");
}
