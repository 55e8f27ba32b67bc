use crate::domain::{AppError, RegisteredTask, RegistrationResult, ScheduledTaskSpec, TaskName};

/// OS scheduling facility (Windows Task Scheduler, crontab, ...).
pub trait TaskScheduler {
    /// Create the task, or replace an existing task with the same name.
    ///
    /// A non-zero facility exit code is reported through the result, not as an error.
    fn create_or_replace(&self, spec: &ScheduledTaskSpec) -> Result<RegistrationResult, AppError>;

    /// Look up a registered task by name.
    fn query(&self, name: &TaskName) -> Result<Option<RegisteredTask>, AppError>;

    /// Remove a task. Returns true if a task was removed.
    fn delete(&self, name: &TaskName) -> Result<bool, AppError>;
}
