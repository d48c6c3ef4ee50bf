//! Virtual environment and interpreter resolution.
//!
//! - [`marker`] - The active-environment guard
//! - [`interpreter`] - Interpreter version queries and package paths

pub mod interpreter;
pub mod marker;

pub use interpreter::{query_sys_path, query_version, InterpreterInfo, PythonVersion};
pub use marker::{ActiveEnvironment, MARKER_VARIABLE};
