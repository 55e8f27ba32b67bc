use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for schedrun operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Log directory could not be created.
    #[error("Failed to create log directory {}: {source}", .path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another run holds the exclusive log lock.
    #[error("Log file is locked by another run: {}", .0.display())]
    LogLocked(PathBuf),

    /// The job's child process could not be spawned.
    #[error("Failed to launch job with '{program}': {source}")]
    JobLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Task name is invalid.
    #[error(
        "Invalid task name '{0}': must be 1-200 characters of letters, digits, inner spaces, '-', '_' or '.'"
    )]
    InvalidTaskName(String),

    /// Start time is not a valid HH:MM value.
    #[error("Invalid start time '{0}': expected HH:MM (24-hour)")]
    InvalidStartTime(String),

    /// Weekday could not be parsed.
    #[error("Invalid weekday '{0}': expected one of mon, tue, wed, thu, fri, sat, sun")]
    InvalidWeekday(String),

    /// The scheduling facility rejected a registration.
    #[error("Failed to register task '{task}' (exit code {exit_code}): {details}")]
    Registration { task: String, exit_code: i32, details: String },

    /// The scheduling facility could not be invoked or returned garbage.
    #[error("Scheduler error running '{program}': {details}")]
    SchedulerCommand { program: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Process exit code for the CLI. Scheduler failures propagate the facility's code.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Registration { exit_code, .. } if *exit_code != 0 => *exit_code,
            _ => 1,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::LogDirectory { source, .. } | AppError::JobLaunch { source, .. } => {
                source.kind()
            }
            AppError::Configuration(_)
            | AppError::InvalidTaskName(_)
            | AppError::InvalidStartTime(_)
            | AppError::InvalidWeekday(_)
            | AppError::TomlParse(_) => io::ErrorKind::InvalidInput,
            AppError::LogLocked(_) => io::ErrorKind::WouldBlock,
            AppError::Registration { .. } | AppError::SchedulerCommand { .. } => {
                io::ErrorKind::Other
            }
        }
    }
}
