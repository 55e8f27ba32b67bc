//! Unregister command: remove the scheduled task.

use crate::app::AppContext;
use crate::domain::{AppError, TaskName};
use crate::ports::TaskScheduler;

/// Remove the task. Returns the name and whether anything was removed.
pub fn execute<S>(
    ctx: &AppContext,
    task_name: Option<&str>,
    scheduler: &S,
) -> Result<(TaskName, bool), AppError>
where
    S: TaskScheduler + ?Sized,
{
    let task_name = match task_name {
        Some(name) => TaskName::new(name)?,
        None => ctx.config().schedule.task_name.clone(),
    };
    let removed = scheduler.delete(&task_name)?;
    tracing::info!(task = %task_name, removed, "unregister finished");

    Ok((task_name, removed))
}
