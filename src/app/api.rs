//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation,
//! the concrete adapters, and command execution.

use std::path::Path;

use crate::adapters::job_process::ProcessJobInvoker;
use crate::adapters::platform_scheduler;
use crate::app::config::{load_config, resolve_project_root};
use crate::app::{
    AppContext,
    commands::{register, resolve, run, status, unregister},
};
use crate::ports::TaskScheduler;

pub use crate::app::commands::register::{RegisterOptions, RegisterOutcome};
pub use crate::app::commands::run::{RunOptions, RunResult};
pub use crate::app::commands::status::StatusOutput;
pub use crate::domain::{AppError, InterpreterPath, TaskName};

/// Resolve the project root and load its configuration.
pub fn open(project_root: Option<&Path>, config: Option<&Path>) -> Result<AppContext, AppError> {
    let root = resolve_project_root(project_root)?;
    let runner_config = load_config(&root, config)?;
    Ok(AppContext::new(root, runner_config, config.map(Path::to_path_buf)))
}

/// Run the job once, appending its output to the log.
pub fn run(ctx: &AppContext, options: RunOptions) -> Result<RunResult, AppError> {
    run::execute(ctx, options, &ProcessJobInvoker::new())
}

/// Report the interpreter a run would use.
pub fn resolve_interpreter(ctx: &AppContext) -> InterpreterPath {
    resolve::execute(ctx)
}

/// Create or replace the scheduled task for this project.
pub fn register(ctx: &AppContext, options: RegisterOptions) -> Result<RegisterOutcome, AppError> {
    let scheduler = scheduler_for(ctx);
    let runner = std::env::current_exe()?;
    register::execute(ctx, options, scheduler.as_ref(), &runner.display().to_string())
}

/// Look up the scheduled task.
pub fn status(ctx: &AppContext, task_name: Option<&str>) -> Result<StatusOutput, AppError> {
    status::execute(ctx, task_name, scheduler_for(ctx).as_ref())
}

/// Remove the scheduled task.
pub fn unregister(ctx: &AppContext, task_name: Option<&str>) -> Result<(TaskName, bool), AppError> {
    unregister::execute(ctx, task_name, scheduler_for(ctx).as_ref())
}

fn scheduler_for(ctx: &AppContext) -> Box<dyn TaskScheduler> {
    platform_scheduler(ctx.config().schedule.scheduler_program.as_deref())
}
