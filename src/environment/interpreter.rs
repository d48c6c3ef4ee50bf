//! Interpreter version queries.
//!
//! The package directory of a virtual environment depends on the
//! interpreter's `major.minor` version, which is asked of the interpreter
//! itself rather than guessed from file names.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DoctorError, Result};
use crate::shell::{execute_quiet, CommandResult};

/// Prints `<major>.<minor>` and nothing else.
pub const VERSION_SCRIPT: &str =
    "import sys; print(f'{sys.version_info[0]}.{sys.version_info[1]}')";

/// Prints executable, single-line version, prefix and base prefix, one per line.
pub const INFO_SCRIPT: &str = "import sys; print(sys.executable); print(' '.join(sys.version.split())); print(sys.prefix); print(getattr(sys, 'base_prefix', sys.prefix))";

/// Prints each `sys.path` entry on its own line.
pub const SYS_PATH_SCRIPT: &str = "import sys; print('\\n'.join(sys.path))";

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\.(\d+)").expect("version pattern is valid"));

/// A `major.minor` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl PythonVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = String;

    /// Parse the leading `major.minor` of a version string.
    ///
    /// Anything after the minor component (patch level, build info) is
    /// ignored, so `3.11.2 (main, ...)` parses as `3.11`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let caps = VERSION_REGEX
            .captures(s)
            .ok_or_else(|| format!("unexpected output '{}'", s.trim()))?;
        let major = caps[1]
            .parse()
            .map_err(|_| format!("major version out of range in '{}'", s.trim()))?;
        let minor = caps[2]
            .parse()
            .map_err(|_| format!("minor version out of range in '{}'", s.trim()))?;
        Ok(Self { major, minor })
    }
}

fn query_failure(python: &str, result: &CommandResult) -> DoctorError {
    let detail = result
        .last_error_line()
        .unwrap_or("no output")
        .to_string();
    DoctorError::VersionQuery {
        interpreter: python.to_string(),
        message: format!("exited with {:?}: {}", result.exit_code, detail),
    }
}

fn launch_failure(python: &str) -> DoctorError {
    DoctorError::VersionQuery {
        interpreter: python.to_string(),
        message: "interpreter could not be launched".to_string(),
    }
}

/// Ask the interpreter for its `major.minor` version.
///
/// # Errors
///
/// Returns [`DoctorError::VersionQuery`] when the interpreter cannot be
/// launched, exits non-zero, or prints something without a leading
/// `major.minor`.
pub fn query_version(python: &str) -> Result<PythonVersion> {
    let result =
        execute_quiet(python, &["-c", VERSION_SCRIPT]).map_err(|_| launch_failure(python))?;

    if !result.success {
        return Err(query_failure(python, &result));
    }

    let version = result
        .stdout
        .parse::<PythonVersion>()
        .map_err(|message| DoctorError::VersionQuery {
            interpreter: python.to_string(),
            message,
        })?;

    tracing::debug!("{} reports version {}", python, version);
    Ok(version)
}

/// Details reported by an interpreter about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterInfo {
    /// Resolved interpreter executable.
    pub executable: PathBuf,
    /// Full version string on a single line.
    pub version: String,
    /// `sys.prefix`.
    pub prefix: PathBuf,
    /// `sys.base_prefix`.
    pub base_prefix: PathBuf,
}

impl InterpreterInfo {
    /// Query an interpreter for its executable, version and prefixes.
    pub fn query(python: &str) -> Result<Self> {
        let result =
            execute_quiet(python, &["-c", INFO_SCRIPT]).map_err(|_| launch_failure(python))?;

        if !result.success {
            return Err(query_failure(python, &result));
        }

        Self::parse(&result.stdout).ok_or_else(|| DoctorError::VersionQuery {
            interpreter: python.to_string(),
            message: format!("unexpected output '{}'", result.stdout.trim()),
        })
    }

    /// Parse the four-line output of [`INFO_SCRIPT`].
    pub fn parse(output: &str) -> Option<Self> {
        let mut lines = output.lines().map(str::trim);
        let executable = lines.next().filter(|l| !l.is_empty())?;
        let version = lines.next().filter(|l| !l.is_empty())?;
        let prefix = lines.next().filter(|l| !l.is_empty())?;
        let base_prefix = lines.next().filter(|l| !l.is_empty())?;

        Some(Self {
            executable: PathBuf::from(executable),
            version: version.to_string(),
            prefix: PathBuf::from(prefix),
            base_prefix: PathBuf::from(base_prefix),
        })
    }

    /// The `major.minor` part of [`InterpreterInfo::version`].
    pub fn short_version(&self) -> Option<PythonVersion> {
        self.version.parse().ok()
    }

    /// Whether the interpreter runs inside a virtual environment.
    pub fn in_virtualenv(&self) -> bool {
        self.prefix != self.base_prefix
    }
}

/// The interpreter's module search path, in import order.
///
/// Empty entries (the current directory) are kept as `""` so the order
/// matches what the interpreter sees. Returns `None` if the query fails.
pub fn query_sys_path(python: &str) -> Option<Vec<String>> {
    let result = execute_quiet(python, &["-c", SYS_PATH_SCRIPT]).ok()?;
    if !result.success {
        tracing::debug!("sys.path query exited with {:?}", result.exit_code);
        return None;
    }
    Some(result.stdout.lines().map(str::to_string).collect())
}
