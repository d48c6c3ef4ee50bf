//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including raw command output.
    Verbose,
    /// Show section titles and status lines.
    #[default]
    Normal,
    /// Show status lines only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows command output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows section titles and headers.
    pub fn shows_sections(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
