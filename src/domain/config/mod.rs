//! Runner configuration (`schedrun.toml`).
//!
//! Every key is optional. Missing sections fall back to defaults so a project
//! without a config file still runs.

pub mod parse;
pub mod paths;

use std::path::PathBuf;

use super::interpreter::InterpreterSettings;
use super::job::DEFAULT_SCRIPT;
use super::schedule::{Cadence, StartTime, TaskName};
use super::AppError;

pub use parse::parse_config_content;

/// Validated runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub job: JobConfig,
    pub log: LogConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    /// Script path, relative to the project root unless absolute.
    pub script: PathBuf,
    /// Arguments passed to the script on every run.
    pub args: Vec<String>,
    pub interpreter: InterpreterSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file path, relative to the project root unless absolute.
    pub path: PathBuf,
    /// Hold a sidecar lock file for the duration of a run.
    pub exclusive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub task_name: TaskName,
    pub cadence: Cadence,
    pub start_time: StartTime,
    /// Override for the scheduler binary (`schtasks` / `crontab`).
    pub scheduler_program: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            job: JobConfig {
                script: PathBuf::from(DEFAULT_SCRIPT),
                args: Vec::new(),
                interpreter: InterpreterSettings::default(),
            },
            log: LogConfig { path: PathBuf::from(paths::DEFAULT_LOG_PATH), exclusive: false },
            schedule: ScheduleConfig {
                task_name: TaskName::default(),
                cadence: Cadence::Daily,
                start_time: StartTime::default(),
                scheduler_program: None,
            },
        }
    }
}

mod dto {
    use std::path::PathBuf;

    use serde::Deserialize;

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct RunnerConfigDto {
        pub job: Option<JobDto>,
        pub log: Option<LogDto>,
        pub schedule: Option<ScheduleDto>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct JobDto {
        pub script: Option<PathBuf>,
        pub args: Option<Vec<String>>,
        pub interpreter: Option<PathBuf>,
        pub fallback_interpreter: Option<String>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct LogDto {
        pub path: Option<PathBuf>,
        pub exclusive: Option<bool>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct ScheduleDto {
        pub task_name: Option<String>,
        pub cadence: Option<String>,
        pub weekday: Option<String>,
        pub time: Option<String>,
        pub scheduler_program: Option<String>,
    }
}

impl TryFrom<dto::RunnerConfigDto> for RunnerConfig {
    type Error = AppError;

    fn try_from(dto: dto::RunnerConfigDto) -> Result<Self, Self::Error> {
        let defaults = RunnerConfig::default();
        let job = dto.job.unwrap_or_default();
        let log = dto.log.unwrap_or_default();
        let schedule = dto.schedule.unwrap_or_default();

        if job.script.as_ref().is_some_and(|s| s.as_os_str().is_empty()) {
            return Err(AppError::config_error("job.script must not be empty"));
        }
        if log.path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(AppError::config_error("log.path must not be empty"));
        }
        if job.fallback_interpreter.as_ref().is_some_and(|f| f.trim().is_empty()) {
            return Err(AppError::config_error("job.fallback_interpreter must not be empty"));
        }

        let cadence = match (schedule.cadence.as_deref(), schedule.weekday.as_deref()) {
            (Some(kind), weekday) => Cadence::parse(kind, weekday)?,
            (None, Some(_)) => {
                return Err(AppError::config_error(
                    "schedule.weekday requires schedule.cadence = \"weekly\"",
                ));
            }
            (None, None) => defaults.schedule.cadence,
        };
        if cadence == Cadence::Daily && schedule.weekday.is_some() {
            return Err(AppError::config_error(
                "schedule.weekday is only valid with schedule.cadence = \"weekly\"",
            ));
        }

        let task_name = match schedule.task_name {
            Some(name) => TaskName::new(&name)?,
            None => defaults.schedule.task_name,
        };
        let start_time = match schedule.time {
            Some(time) => time.parse()?,
            None => defaults.schedule.start_time,
        };

        Ok(RunnerConfig {
            job: JobConfig {
                script: job.script.unwrap_or(defaults.job.script),
                args: job.args.unwrap_or_default(),
                interpreter: InterpreterSettings {
                    preferred: job.interpreter.unwrap_or(defaults.job.interpreter.preferred),
                    fallback: job
                        .fallback_interpreter
                        .unwrap_or(defaults.job.interpreter.fallback),
                },
            },
            log: LogConfig {
                path: log.path.unwrap_or(defaults.log.path),
                exclusive: log.exclusive.unwrap_or(false),
            },
            schedule: ScheduleConfig {
                task_name,
                cadence,
                start_time,
                scheduler_program: schedule.scheduler_program,
            },
        })
    }
}
