//! Loading command implementation.
//!
//! The `construct loading` command checks the analysis dependencies, then
//! renders the sine-wave plot and saves it next to the project.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::{PlotImage, PlotSize, Signal, SAMPLE_COUNT};
use crate::artifact::{candidate_path, ArtifactWriter, WriteOutcome};
use crate::environment::SystemInspector;
use crate::error::Result;
use crate::packages::{
    check_dependencies, PackageRegistry, SitePackagesRegistry, REQUIRED_DEPENDENCIES,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// File name the plot is saved under before any fallback.
pub const PLOT_FILE_NAME: &str = "matrix_analysis.png";

/// The loading command implementation.
pub struct LoadingCommand {
    project_root: PathBuf,
    registry: Option<Box<dyn PackageRegistry>>,
    writer: ArtifactWriter,
    plot_size: PlotSize,
}

impl LoadingCommand {
    /// Create a new loading command.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            registry: None,
            writer: ArtifactWriter::new(),
            plot_size: PlotSize::default(),
        }
    }

    /// Look packages up in `registry` instead of the detected interpreter.
    pub fn with_registry(mut self, registry: Box<dyn PackageRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Use a custom artifact writer.
    pub fn with_writer(mut self, writer: ArtifactWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Render the plot at a custom size.
    pub fn with_plot_size(mut self, plot_size: PlotSize) -> Self {
        self.plot_size = plot_size;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Where the plot is saved when nothing blocks it.
    pub fn plot_path(&self) -> PathBuf {
        self.project_root.join(PLOT_FILE_NAME)
    }

    fn check(&self, ui: &mut dyn UserInterface) -> bool {
        ui.message("Checking dependencies:");

        let report = match &self.registry {
            Some(registry) => check_dependencies(registry.as_ref(), REQUIRED_DEPENDENCIES),
            None => {
                let inspector = SystemInspector::detect();
                let registry = SitePackagesRegistry::from_inspector(&inspector);
                debug!("Found {} installed packages", registry.len());
                check_dependencies(&registry, REQUIRED_DEPENDENCIES)
            }
        };

        for status in &report.statuses {
            if status.is_installed() {
                ui.success(&status.line());
            } else {
                ui.error(&status.line());
            }
        }

        report.all_installed()
    }

    fn report_failed_attempts(&self, ui: &mut dyn UserInterface, outcome: &WriteOutcome) {
        let base = self.plot_path();
        for attempt in outcome.failed_attempts() {
            ui.error(&format!(
                "Error saving visualization in file {}",
                attempt.candidate_path.display()
            ));
            if attempt.attempt_index < self.writer.max_attempts() {
                let next = candidate_path(&base, attempt.attempt_index);
                ui.message(&format!(
                    "Recovery program visualization saving in file {}",
                    next.display()
                ));
            }
        }
    }
}

impl Command for LoadingCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("LOADING STATUS: Loading programs...");

        if !self.check(ui) {
            ui.message("");
            ui.error("Error: Missing required packages.");
            return Ok(CommandResult::failure(1));
        }

        ui.message("");
        ui.message("Analyzing Matrix data...");
        ui.message(&format!("Processing {} data points...", SAMPLE_COUNT));
        let signal = Signal::sine(SAMPLE_COUNT);

        ui.message("Generating visualization...");
        let plot = PlotImage::from_signal(&signal, self.plot_size)?;

        let outcome = self
            .writer
            .write(&self.plot_path(), |path: &Path| plot.save(path))?;
        self.report_failed_attempts(ui, &outcome);

        match outcome.final_path() {
            Some(path) => {
                ui.message("");
                ui.success("Analysis complete!");
                ui.success(&format!("Results saved to: {}", path.display()));
                Ok(CommandResult::success())
            }
            None => {
                ui.error("Saving visualization failed");
                Ok(CommandResult::failure(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    struct FakeRegistry(HashMap<&'static str, &'static str>);

    impl PackageRegistry for FakeRegistry {
        fn installed_version(&self, package_name: &str) -> Option<String> {
            self.0.get(package_name).map(|v| v.to_string())
        }
    }

    fn registry(installed: &[(&'static str, &'static str)]) -> Box<dyn PackageRegistry> {
        Box::new(FakeRegistry(installed.iter().copied().collect()))
    }

    fn all_installed() -> Box<dyn PackageRegistry> {
        registry(&[
            ("pandas", "2.2.3"),
            ("numpy", "2.1.3"),
            ("matplotlib", "3.9.2"),
        ])
    }

    fn small() -> PlotSize {
        PlotSize {
            width: 120,
            height: 80,
            margin: 10,
        }
    }

    #[test]
    fn saves_plot_when_everything_is_installed() {
        let temp = TempDir::new().unwrap();
        let cmd = LoadingCommand::new(temp.path())
            .with_registry(all_installed())
            .with_plot_size(small());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_header("LOADING STATUS: Loading programs..."));
        assert!(ui.has_success("[OK] numpy (2.1.3) - Numerical computations ready"));
        assert!(ui.has_message("Processing 1000 data points..."));
        assert!(ui.has_success("Analysis complete!"));
        assert!(ui.errors().is_empty());

        let saved = temp.path().join(PLOT_FILE_NAME);
        assert!(saved.is_file());
        assert!(ui.has_success(&format!("Results saved to: {}", saved.display())));
        assert_eq!(&fs::read(&saved).unwrap()[..4], b"\x89PNG");
    }

    #[test]
    fn missing_numpy_fails_before_analysis() {
        let temp = TempDir::new().unwrap();
        let cmd = LoadingCommand::new(temp.path()).with_registry(registry(&[
            ("pandas", "2.2.3"),
            ("matplotlib", "3.9.2"),
        ]));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("[ERROR] numpy is missing. Required for: Numerical computations ready"));
        assert!(ui.has_error("Error: Missing required packages."));
        assert!(!ui.has_message("Analyzing Matrix data..."));
        assert!(!temp.path().join(PLOT_FILE_NAME).exists());
    }

    #[test]
    fn dependencies_are_reported_in_order() {
        let temp = TempDir::new().unwrap();
        let cmd = LoadingCommand::new(temp.path()).with_registry(registry(&[]));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let lines: Vec<&String> = ui
            .errors()
            .iter()
            .filter(|line| line.starts_with("[ERROR]"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("pandas"));
        assert!(lines[1].contains("numpy"));
        assert!(lines[2].contains("matplotlib"));
    }

    #[test]
    fn blocked_target_falls_back_to_next_candidate() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join(PLOT_FILE_NAME);
        fs::create_dir(&base).unwrap();

        let cmd = LoadingCommand::new(temp.path())
            .with_registry(all_installed())
            .with_plot_size(small());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        let fallback = temp.path().join("matrix_analysis(1).png");

        assert!(result.success);
        assert!(fallback.is_file());
        assert!(ui.has_error(&format!(
            "Error saving visualization in file {}",
            base.display()
        )));
        assert!(ui.has_message(&format!(
            "Recovery program visualization saving in file {}",
            fallback.display()
        )));
        assert!(ui.has_success(&format!("Results saved to: {}", fallback.display())));
    }

    #[test]
    fn all_candidates_blocked_reports_failure() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join(PLOT_FILE_NAME);
        for index in 0..3 {
            fs::create_dir(candidate_path(&base, index)).unwrap();
        }

        let cmd = LoadingCommand::new(temp.path())
            .with_registry(all_installed())
            .with_writer(ArtifactWriter::new().with_max_attempts(3))
            .with_plot_size(small());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Saving visualization failed"));
        assert!(!ui.has_success("Analysis complete!"));
        // One error line per attempt, recovery lines only between attempts.
        let attempt_errors = ui
            .errors()
            .iter()
            .filter(|line| line.starts_with("Error saving visualization"))
            .count();
        assert_eq!(attempt_errors, 3);
        let recoveries = ui
            .messages()
            .iter()
            .filter(|line| line.starts_with("Recovery program"))
            .count();
        assert_eq!(recoveries, 2);
    }

    #[test]
    fn plot_path_is_inside_project() {
        let cmd = LoadingCommand::new(Path::new("/zion"));
        assert_eq!(cmd.plot_path(), PathBuf::from("/zion/matrix_analysis.png"));
        assert_eq!(cmd.project_root(), Path::new("/zion"));
    }
}
