use std::path::{Path, PathBuf};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE: &str = "schedrun.toml";

/// `<root>/schedrun.toml`
pub fn config(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Default log file, relative to the project root.
pub const DEFAULT_LOG_PATH: &str = "logs/runner.log";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_at_project_root() {
        assert_eq!(config(Path::new("/srv/export")), PathBuf::from("/srv/export/schedrun.toml"));
    }
}
