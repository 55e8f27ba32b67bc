use std::fmt;
use std::path::{Path, PathBuf};

use super::interpreter::InterpreterPath;

/// Default job script, relative to the project root.
pub const DEFAULT_SCRIPT: &str = "playwright_runner.py";

/// A fully resolved job run: interpreter, script, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInvocation {
    pub interpreter: InterpreterPath,
    pub script: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl JobInvocation {
    /// Build an invocation rooted at `project_root`. Relative scripts resolve against it.
    pub fn new(
        interpreter: InterpreterPath,
        project_root: &Path,
        script: &Path,
        args: Vec<String>,
    ) -> Self {
        let script =
            if script.is_absolute() { script.to_path_buf() } else { project_root.join(script) };
        Self { interpreter, script, args, working_dir: project_root.to_path_buf() }
    }
}

impl fmt::Display for JobInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.interpreter, self.script.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
