//! Append-only log file sink.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::LogSink;

/// Resolve the log file path and create its parent directories.
///
/// Idempotent. Failure here is fatal and must abort the run before the job starts.
pub fn ensure_log_path(project_root: &Path, log_path: &Path) -> Result<PathBuf, AppError> {
    let path =
        if log_path.is_absolute() { log_path.to_path_buf() } else { project_root.join(log_path) };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|source| AppError::LogDirectory { path: dir.to_path_buf(), source })?;
    }

    Ok(path)
}

/// Log sink backed by a file opened in append mode.
#[derive(Debug)]
pub struct FileLogSink {
    path: PathBuf,
    file: File,
}

impl FileLogSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLogSink {
    fn append(&mut self, bytes: &[u8]) -> Result<(), AppError> {
        self.file.write_all(bytes)?;
        self.file.flush()?;
        Ok(())
    }
}

/// Exclusive claim on a log file, held through a `<log>.lock` sidecar.
///
/// The sidecar is removed when the guard drops. A crashed run leaves it behind;
/// remove it by hand after checking no run is active.
#[derive(Debug)]
pub struct LogLock {
    path: PathBuf,
}

impl LogLock {
    pub fn acquire(log_path: &Path) -> Result<Self, AppError> {
        let mut lock_name = log_path.as_os_str().to_os_string();
        lock_name.push(".lock");
        let path = PathBuf::from(lock_name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(AppError::LogLocked(path));
            }
            Err(e) => return Err(e.into()),
        };
        writeln!(file, "{}", std::process::id())?;

        tracing::debug!(lock = %path.display(), "acquired log lock");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LogLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(lock = %self.path.display(), error = %e, "failed to remove log lock");
        }
    }
}
