//! Oracle command implementation.
//!
//! The `construct oracle` command reads the Matrix configuration from the
//! process environment and the project's `.env` file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{
    env_file_present, ConfigSource, LayeredConfig, MatrixConfig, ENV_FILE_NAME,
};
use crate::error::{ConstructError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The oracle command implementation.
pub struct OracleCommand {
    project_root: PathBuf,
    base: Option<LayeredConfig>,
}

impl OracleCommand {
    /// Create a new oracle command reading the process environment.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            base: None,
        }
    }

    /// Use `base` in place of the process environment.
    ///
    /// The `.env` file is still layered underneath it.
    pub fn with_base_config(mut self, base: LayeredConfig) -> Self {
        self.base = Some(base);
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn load_config(&self) -> Result<LayeredConfig> {
        let mut config = self
            .base
            .clone()
            .unwrap_or_else(LayeredConfig::from_process_env);
        config.load(&self.project_root.join(ENV_FILE_NAME))?;
        Ok(config)
    }
}

impl Command for OracleCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = self.load_config()?;

        ui.show_header("ORACLE STATUS: Reading the Matrix...");
        ui.message("Configuration loaded:");

        let config = match MatrixConfig::from_source(&source) {
            Ok(config) => config,
            Err(e @ ConstructError::MissingConfiguration { .. }) => {
                ui.error(&format!("Configuration Error: {}", e));
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };
        debug!("Loaded {:?}", config);

        ui.message(&format!("Mode: {}", config.mode));
        ui.message("Database: Connected to local instance");
        ui.message("API Access: Authenticated");
        ui.message(&format!("Log Level: {}", config.log_level));
        ui.message("Zion Network: Online");

        ui.message("");
        ui.message("Environment security check:");
        ui.success("[OK] No hardcoded secrets detected");
        if env_file_present(&self.project_root) {
            ui.success("[OK] .env file properly configured");
        } else {
            ui.warning("[WARNING] .env file is missing");
        }
        ui.success("[OK] Production overrides available");

        ui.message("");
        ui.message("The Oracle sees all configurations.");

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvLayer, PROCESS_ENV_SOURCE};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const COMPLETE_ENV: &str = "\
MATRIX_MODE=development
DATABASE_URL=postgres://localhost/zion
API_KEY=red-pill
LOG_LEVEL=DEBUG
ZION_ENDPOINT=https://zion.local/api
";

    fn base(vars: &[(&str, &str)]) -> LayeredConfig {
        let mut config = LayeredConfig::new();
        config.push_layer(EnvLayer::from_vars(
            PROCESS_ENV_SOURCE,
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        ));
        config
    }

    fn project(env: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        if let Some(content) = env {
            fs::write(temp.path().join(ENV_FILE_NAME), content).unwrap();
        }
        temp
    }

    #[test]
    fn reads_complete_env_file() {
        let temp = project(Some(COMPLETE_ENV));
        let cmd = OracleCommand::new(temp.path()).with_base_config(base(&[]));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_header("ORACLE STATUS: Reading the Matrix..."));
        assert!(ui.has_message("Mode: development"));
        assert!(ui.has_message("Log Level: DEBUG"));
        assert!(ui.has_message("Zion Network: Online"));
        assert!(ui.has_success("[OK] .env file properly configured"));
        assert!(ui.has_message("The Oracle sees all configurations."));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn process_environment_overrides_file() {
        let temp = project(Some(COMPLETE_ENV));
        let cmd = OracleCommand::new(temp.path())
            .with_base_config(base(&[("MATRIX_MODE", "production")]));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("Mode: production"));
        assert!(!ui.has_message("Mode: development"));
    }

    #[test]
    fn missing_api_key_lists_only_api_key() {
        let temp = project(Some(
            "MATRIX_MODE=development\nDATABASE_URL=db\nLOG_LEVEL=INFO\nZION_ENDPOINT=zion\n",
        ));
        let cmd = OracleCommand::new(temp.path()).with_base_config(base(&[]));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(
            ui.errors(),
            ["Configuration Error: Missing required configuration variables: API_KEY"]
        );
        assert!(!ui.has_message("Mode:"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let temp = project(Some(COMPLETE_ENV));
        let cmd =
            OracleCommand::new(temp.path()).with_base_config(base(&[("LOG_LEVEL", "")]));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert!(ui.has_error("LOG_LEVEL"));
    }

    #[test]
    fn no_env_file_warns_when_environment_is_complete() {
        let temp = project(None);
        let cmd = OracleCommand::new(temp.path()).with_base_config(base(&[
            ("MATRIX_MODE", "production"),
            ("DATABASE_URL", "postgres://db"),
            ("API_KEY", "blue-pill"),
            ("LOG_LEVEL", "WARN"),
            ("ZION_ENDPOINT", "https://zion"),
        ]));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("[WARNING] .env file is missing"));
        assert!(!ui.has_success(".env file properly configured"));
    }

    #[test]
    fn nothing_configured_lists_every_variable() {
        let temp = project(None);
        let cmd = OracleCommand::new(temp.path()).with_base_config(base(&[]));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_error(
            "MATRIX_MODE, DATABASE_URL, API_KEY, LOG_LEVEL, ZION_ENDPOINT"
        ));
    }
}
