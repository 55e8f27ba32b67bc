use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::Serialize;

use super::AppError;

pub const DEFAULT_TASK_NAME: &str = "shopify-export";
pub const DEFAULT_START_TIME: &str = "09:00";

const MAX_TASK_NAME_LEN: usize = 200;

/// Name under which a task is registered with the OS scheduler.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    pub fn new(name: &str) -> Result<Self, AppError> {
        let valid = !name.trim().is_empty()
            && name.trim() == name
            && name.len() <= MAX_TASK_NAME_LEN
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '));
        if !valid {
            return Err(AppError::InvalidTaskName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskName {
    fn default() -> Self {
        Self(DEFAULT_TASK_NAME.to_string())
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local time-of-day at which a task fires, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartTime(NaiveTime);

impl StartTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl Default for StartTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl FromStr for StartTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts single-digit hours, which schtasks rejects.
        if trimmed.len() != 5 {
            return Err(AppError::InvalidStartTime(s.to_string()));
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self)
            .map_err(|_| AppError::InvalidStartTime(s.to_string()))
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for StartTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Recurrence rule for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Daily,
    Weekly(Weekday),
}

impl Cadence {
    /// Parse a cadence keyword plus an optional weekday.
    pub fn parse(kind: &str, weekday: Option<&str>) -> Result<Self, AppError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Cadence::Daily),
            "weekly" => {
                let day = weekday.ok_or_else(|| {
                    AppError::config_error("Weekly cadence requires a weekday (e.g. 'fri')")
                })?;
                Ok(Cadence::Weekly(parse_weekday(day)?))
            }
            other => Err(AppError::config_error(format!(
                "Invalid cadence '{}': must be 'daily' or 'weekly'",
                other
            ))),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Daily => f.write_str("daily"),
            Cadence::Weekly(day) => write!(f, "weekly ({})", weekday_code(*day).to_lowercase()),
        }
    }
}

impl Serialize for Cadence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `mon`, `Monday`, `FRI`... into a weekday.
pub fn parse_weekday(value: &str) -> Result<Weekday, AppError> {
    Weekday::from_str(value.trim()).map_err(|_| AppError::InvalidWeekday(value.to_string()))
}

/// Three-letter upper-case code used by schtasks (`MON`..`SUN`).
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

/// A program plus its argument list, kept structured until a scheduler renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// All elements, program first.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

/// Everything the OS scheduler needs to create or replace a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledTaskSpec {
    pub task_name: TaskName,
    pub cadence: Cadence,
    pub start_time: StartTime,
    pub command: CommandLine,
}

/// Outcome reported by the scheduling facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationResult {
    pub success: bool,
    pub exit_code: i32,
    pub details: String,
}

/// A task as read back from the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredTask {
    pub task_name: TaskName,
    pub cadence: Cadence,
    pub start_time: StartTime,
    pub command: String,
}
