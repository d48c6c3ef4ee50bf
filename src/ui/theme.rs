//! Visual theme and styling.

use console::Style;

use super::icons::StatusKind;

/// venv-doctor's visual theme.
#[derive(Debug, Clone)]
pub struct DoctorTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational lines (cyan).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for section titles (bold).
    pub section: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
}

impl Default for DoctorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            section: Style::new().bold(),
            header: Style::new().bold().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            section: Style::new(),
            header: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        StatusKind::Success.format(self, msg)
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        StatusKind::Warning.format(self, msg)
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        StatusKind::Failed.format(self, msg)
    }

    /// Format a skipped message.
    pub fn format_skipped(&self, msg: &str) -> String {
        StatusKind::Skipped.format(self, msg)
    }

    /// Format a section title.
    pub fn format_section(&self, title: &str) -> String {
        self.section.apply_to(title).to_string()
    }

    /// Format a header banner with an underline rule.
    pub fn format_header(&self, title: &str) -> String {
        let rule = "=".repeat(60);
        format!(
            "{}\n{}",
            self.header.apply_to(format!("🩺 {}", title)),
            self.dim.apply_to(rule)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
