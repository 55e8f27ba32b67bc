//! Status and unregister command implementations.

use crate::app::AppContext;
use crate::domain::AppError;

pub fn run_status(ctx: &AppContext, name: Option<String>, json: bool) -> Result<i32, AppError> {
    let output = crate::app::api::status(ctx, name.as_deref())?;

    if json {
        let rendered = serde_json::to_string_pretty(&output).map_err(|e| {
            AppError::config_error(format!("Failed to serialize status: {}", e))
        })?;
        println!("{}", rendered);
    } else if let Some(task) = &output.task {
        println!("Task '{}' is registered", task.task_name);
        println!("  Cadence: {}", task.cadence);
        println!("  Time:    {}", task.start_time);
        println!("  Command: {}", task.command);
    } else {
        println!("Task '{}' is not registered", output.task_name);
    }

    Ok(if output.registered { 0 } else { 1 })
}

pub fn run_unregister(ctx: &AppContext, name: Option<String>) -> Result<(), AppError> {
    let (task_name, removed) = crate::app::api::unregister(ctx, name.as_deref())?;
    if removed {
        println!("✅ Removed task '{}'", task_name);
    } else {
        println!("Task '{}' was not registered", task_name);
    }
    Ok(())
}
