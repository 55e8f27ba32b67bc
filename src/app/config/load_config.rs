//! Runner configuration loading from the project root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::{self, parse_config_content};
use crate::domain::{AppError, RunnerConfig};

/// Resolve the project root: explicit value, else the current directory.
///
/// The result is absolute and must be an existing directory.
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(AppError::config_error(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }
    Ok(std::path::absolute(&root)?)
}

/// Load `schedrun.toml`.
///
/// An explicitly requested file must exist. Without one, a missing
/// `<root>/schedrun.toml` yields the defaults.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<RunnerConfig, AppError> {
    let path = match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => project_root.join(path),
        None => config::paths::config(project_root),
    };

    if !path.exists() {
        if explicit.is_some() {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(RunnerConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    parse_config_content(&content).map_err(|e| match e {
        AppError::TomlParse(inner) => {
            AppError::config_error(format!("Invalid config {}: {}", path.display(), inner))
        }
        other => other,
    })
}
