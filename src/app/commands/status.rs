//! Status command: look up the registered task.

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{AppError, RegisteredTask, TaskName};
use crate::ports::TaskScheduler;

/// Output of the status command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    pub task_name: TaskName,
    pub registered: bool,
    pub task: Option<RegisteredTask>,
}

pub fn execute<S>(
    ctx: &AppContext,
    task_name: Option<&str>,
    scheduler: &S,
) -> Result<StatusOutput, AppError>
where
    S: TaskScheduler + ?Sized,
{
    let task_name = match task_name {
        Some(name) => TaskName::new(name)?,
        None => ctx.config().schedule.task_name.clone(),
    };
    let task = scheduler.query(&task_name)?;

    Ok(StatusOutput { task_name, registered: task.is_some(), task })
}
