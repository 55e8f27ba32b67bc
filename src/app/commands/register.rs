//! Register command: create or replace the OS scheduled task.

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{
    AppError, Cadence, CommandLine, RegistrationResult, ScheduledTaskSpec, StartTime, TaskName,
};
use crate::ports::TaskScheduler;

/// Options for the register command. Unset fields fall back to the config.
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    pub task_name: Option<String>,
    pub start_time: Option<String>,
    pub cadence: Option<Cadence>,
    /// Build and return the spec without calling the scheduler.
    pub dry_run: bool,
}

/// Output of the register command.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterOutcome {
    pub spec: ScheduledTaskSpec,
    /// `None` for dry runs.
    pub result: Option<RegistrationResult>,
}

/// Build the task spec. The scheduled command re-enters this binary's `run`
/// subcommand so scheduled and manual runs share logging and cwd handling.
pub fn build_spec(
    ctx: &AppContext,
    options: &RegisterOptions,
    runner_program: &str,
) -> Result<ScheduledTaskSpec, AppError> {
    let schedule = &ctx.config().schedule;

    let task_name = match options.task_name.as_deref() {
        Some(name) => TaskName::new(name)?,
        None => schedule.task_name.clone(),
    };
    let start_time = match options.start_time.as_deref() {
        Some(time) => time.parse::<StartTime>()?,
        None => schedule.start_time,
    };
    let cadence = options.cadence.unwrap_or(schedule.cadence);

    let mut args = vec![
        "run".to_string(),
        "--project-root".to_string(),
        ctx.project_root().display().to_string(),
    ];
    if let Some(config_path) = ctx.config_path() {
        let config_path = if config_path.is_absolute() {
            config_path.to_path_buf()
        } else {
            ctx.project_root().join(config_path)
        };
        args.extend(["--config".to_string(), config_path.display().to_string()]);
    }

    Ok(ScheduledTaskSpec {
        task_name,
        cadence,
        start_time,
        command: CommandLine::new(runner_program, args),
    })
}

/// Register the task. A facility failure becomes `AppError::Registration`.
pub fn execute<S>(
    ctx: &AppContext,
    options: RegisterOptions,
    scheduler: &S,
    runner_program: &str,
) -> Result<RegisterOutcome, AppError>
where
    S: TaskScheduler + ?Sized,
{
    let spec = build_spec(ctx, &options, runner_program)?;
    if options.dry_run {
        return Ok(RegisterOutcome { spec, result: None });
    }

    tracing::info!(
        task = %spec.task_name,
        cadence = %spec.cadence,
        time = %spec.start_time,
        "registering task"
    );
    let result = scheduler.create_or_replace(&spec)?;
    if !result.success {
        return Err(AppError::Registration {
            task: spec.task_name.to_string(),
            exit_code: result.exit_code,
            details: result.details,
        });
    }

    Ok(RegisterOutcome { spec, result: Some(result) })
}
