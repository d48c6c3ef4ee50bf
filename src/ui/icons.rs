//! Status vocabulary for consistent CLI output.
//!
//! `StatusKind` provides the canonical set of status icons used by every
//! check the tool reports.

use super::theme::DoctorTheme;

/// Canonical status kinds used across all venv-doctor output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Check passed.
    Success,
    /// Check failed.
    Failed,
    /// Non-fatal problem.
    Warning,
    /// Check was not run.
    Skipped,
    /// Informational line.
    Info,
}

impl StatusKind {
    /// Emoji icon prefixed to status lines.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Failed => "❌",
            Self::Warning => "⚠️",
            Self::Skipped => "⏭️",
            Self::Info => "ℹ️",
        }
    }

    /// Bracketed text for logs and plain output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Warning => "[warn]",
            Self::Skipped => "[skip]",
            Self::Info => "[info]",
        }
    }

    /// Styled icon + message using the given theme.
    pub fn format(self, theme: &DoctorTheme, msg: &str) -> String {
        let line = format!("{} {}", self.icon(), msg);
        match self {
            Self::Success => theme.success.apply_to(line).to_string(),
            Self::Failed => theme.error.apply_to(line).to_string(),
            Self::Warning => theme.warning.apply_to(line).to_string(),
            Self::Skipped => theme.dim.apply_to(line).to_string(),
            Self::Info => theme.info.apply_to(line).to_string(),
        }
    }

    /// Format a status line without styling: icon + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.icon(), msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StatusKind; 5] = [
        StatusKind::Success,
        StatusKind::Failed,
        StatusKind::Warning,
        StatusKind::Skipped,
        StatusKind::Info,
    ];

    #[test]
    fn icon_returns_emoji() {
        assert_eq!(StatusKind::Success.icon(), "✅");
        assert_eq!(StatusKind::Failed.icon(), "❌");
        assert_eq!(StatusKind::Warning.icon(), "⚠️");
    }

    #[test]
    fn format_plain_prefixes_icon() {
        assert_eq!(
            StatusKind::Failed.format_plain("cv2 import failed"),
            "❌ cv2 import failed"
        );
    }

    #[test]
    fn plain_theme_format_matches_format_plain() {
        let theme = DoctorTheme::plain();
        for kind in ALL {
            assert_eq!(kind.format(&theme, "x"), kind.format_plain("x"));
        }
    }

    #[test]
    fn all_variants_have_unique_icons() {
        let mut icons: Vec<&str> = ALL.iter().map(|k| k.icon()).collect();
        icons.sort();
        icons.dedup();
        assert_eq!(icons.len(), ALL.len(), "All icons should be unique");
    }

    #[test]
    fn all_variants_have_unique_brackets() {
        let mut brackets: Vec<&str> = ALL.iter().map(|k| k.bracketed()).collect();
        brackets.sort();
        brackets.dedup();
        assert_eq!(brackets.len(), ALL.len(), "All brackets should be unique");
    }
}
