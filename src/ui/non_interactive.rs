//! Non-interactive UI for pipes, CI and headless environments.

use super::{OutputMode, SpinnerHandle, StatusKind, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Status lines go to stdout with their emoji prefix and no styling;
/// warnings and errors go to stderr. Spinners degrade to one line when
/// started and one line when finished.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", StatusKind::Success.format_plain(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", StatusKind::Warning.format_plain(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", StatusKind::Failed.format_plain(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("{}", message);
        Box::new(LineSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_sections() {
            println!("🩺 {}", title);
            println!("{}", "=".repeat(60));
        }
    }

    fn show_section(&mut self, title: &str) {
        if self.mode.shows_sections() {
            println!("\n{}", title);
        }
    }
}

/// Spinner that prints its final state as a single line.
struct LineSpinner;

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("{}", StatusKind::Success.format_plain(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", StatusKind::Failed.format_plain(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        println!("{}", StatusKind::Skipped.format_plain(msg));
    }
}
