//! External program execution.
//!
//! Programs are launched directly (no intermediate shell) so interpreter
//! and package-manager arguments are never re-parsed.

use crate::error::{DoctorError, Result};
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Last non-empty line of stderr, falling back to stdout.
    ///
    /// Python tracebacks end with the exception line, which is the
    /// useful part for a one-line report.
    pub fn last_error_line(&self) -> Option<&str> {
        last_non_empty_line(&self.stderr).or_else(|| last_non_empty_line(&self.stdout))
    }
}

fn last_non_empty_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rfind(|l| !l.is_empty())
}

/// Render a program invocation for messages and logs.
pub fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(
        args.iter()
            .map(|a| a.as_ref().to_string_lossy().into_owned()),
    );
    parts.join(" ")
}

/// Execute a program with arguments and collect its output.
///
/// stdin is closed and both output streams are captured. Returns
/// `Err(CommandFailed)` only when the program cannot be launched; a non-zero
/// exit is reported through [`CommandResult::success`].
pub fn execute_quiet<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<CommandResult> {
    let start = Instant::now();
    let rendered = display_command(program, args);
    tracing::debug!("Executing: {}", rendered);

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            tracing::debug!("Failed to launch '{}': {}", rendered, e);
            DoctorError::CommandFailed {
                command: rendered.clone(),
                code: None,
            }
        })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "'{}' exited with {:?} after {:?}",
        rendered,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute_quiet("echo", &["hello"]).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute_quiet("sh", &["-c", "exit 3"]).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_missing_program_is_an_error() {
        let err = execute_quiet("venv-doctor-no-such-program", &["--version"]).unwrap_err();
        match err {
            DoctorError::CommandFailed { command, code } => {
                assert_eq!(command, "venv-doctor-no-such-program --version");
                assert_eq!(code, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stdin_is_closed() {
        let result = execute_quiet("cat", &[] as &[&str]).unwrap();
        assert!(result.success);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn arguments_are_not_shell_expanded() {
        let result = execute_quiet("echo", &["$HOME", "*"]).unwrap();
        assert_eq!(result.stdout.trim(), "$HOME *");
    }

    #[test]
    fn last_error_line_prefers_stderr() {
        let result = CommandResult::failure(
            Some(1),
            "ignored\n".into(),
            "Traceback (most recent call last):\n  File \"<string>\", line 1\nModuleNotFoundError: No module named 'cv2'\n\n".into(),
            Duration::ZERO,
        );
        assert_eq!(
            result.last_error_line(),
            Some("ModuleNotFoundError: No module named 'cv2'")
        );
    }

    #[test]
    fn last_error_line_falls_back_to_stdout() {
        let result =
            CommandResult::failure(Some(1), "only stdout\n".into(), "  \n".into(), Duration::ZERO);
        assert_eq!(result.last_error_line(), Some("only stdout"));

        let empty = CommandResult::failure(Some(1), String::new(), String::new(), Duration::ZERO);
        assert_eq!(empty.last_error_line(), None);
    }

    #[test]
    fn display_command_joins_arguments() {
        assert_eq!(
            display_command("pip", &["install", "--no-cache-dir", "x"]),
            "pip install --no-cache-dir x"
        );
        assert_eq!(display_command("pip", &[] as &[&str]), "pip");
    }
}
