//! Interpreter resolution with a venv-first, PATH-fallback policy.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default location of the project-local interpreter, relative to the project root.
#[cfg(windows)]
pub const DEFAULT_PREFERRED_INTERPRETER: &str = r".venv\Scripts\python.exe";
#[cfg(not(windows))]
pub const DEFAULT_PREFERRED_INTERPRETER: &str = ".venv/bin/python";

/// Command name looked up through the OS search path when no venv exists.
pub const DEFAULT_FALLBACK_INTERPRETER: &str = "python";

/// Where to look for an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterSettings {
    /// Preferred interpreter path relative to the project root.
    pub preferred: PathBuf,
    /// Bare command name used when the preferred path is absent.
    pub fallback: String,
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        Self {
            preferred: PathBuf::from(DEFAULT_PREFERRED_INTERPRETER),
            fallback: DEFAULT_FALLBACK_INTERPRETER.to_string(),
        }
    }
}

/// A resolved interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterPath {
    /// Project-local interpreter found on disk.
    Preferred(PathBuf),
    /// Bare command name left for the OS to resolve.
    Fallback(String),
}

impl InterpreterPath {
    /// Value handed to `std::process::Command::new`.
    pub fn program(&self) -> &OsStr {
        match self {
            InterpreterPath::Preferred(path) => path.as_os_str(),
            InterpreterPath::Fallback(name) => OsStr::new(name),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, InterpreterPath::Fallback(_))
    }
}

impl fmt::Display for InterpreterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpreterPath::Preferred(path) => write!(f, "{}", path.display()),
            InterpreterPath::Fallback(name) => write!(f, "{name}"),
        }
    }
}

/// Resolve the interpreter for a project.
///
/// Never fails: an interpreter that does not exist anywhere surfaces later as
/// a launch failure.
pub fn resolve(project_root: &Path, settings: &InterpreterSettings) -> InterpreterPath {
    let candidate = project_root.join(&settings.preferred);
    if candidate.is_file() {
        tracing::debug!(interpreter = %candidate.display(), "using project interpreter");
        return InterpreterPath::Preferred(candidate);
    }

    tracing::info!(
        candidate = %candidate.display(),
        fallback = %settings.fallback,
        "project interpreter not found; falling back to search path"
    );
    InterpreterPath::Fallback(settings.fallback.clone())
}
