//! Visual theme and styling.

use console::{Style, Term};

/// Colors used for terminal output.
#[derive(Debug, Clone)]
pub struct ConstructTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for headers (green bold).
    pub header: Style,
}

impl Default for ConstructTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            header: Style::new().green().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        self.success.apply_to(msg).to_string()
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(msg).to_string()
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(msg).to_string()
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        self.header.apply_to(title).to_string()
    }
}

/// Check if colors should be enabled for stdout.
pub fn should_use_colors() -> bool {
    colors_enabled_for(&Term::stdout())
}

/// Check if colors should be enabled for output written to `term`.
pub fn colors_enabled_for(term: &Term) -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    term.is_term()
}
