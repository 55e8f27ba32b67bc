use std::path::{Path, PathBuf};

use crate::domain::RunnerConfig;

/// Project root plus the configuration loaded for it.
#[derive(Debug, Clone)]
pub struct AppContext {
    project_root: PathBuf,
    config: RunnerConfig,
    config_path: Option<PathBuf>,
}

impl AppContext {
    /// Create a new application context.
    ///
    /// `config_path` is the explicitly selected config file, if any; it is
    /// forwarded to scheduled runs so they load the same file.
    pub fn new(project_root: PathBuf, config: RunnerConfig, config_path: Option<PathBuf>) -> Self {
        Self { project_root, config, config_path }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
