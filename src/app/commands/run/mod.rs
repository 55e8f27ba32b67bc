//! Run command: resolve the interpreter, invoke the job once, log everything.

use std::path::PathBuf;

use crate::adapters::log_file::{FileLogSink, LogLock, ensure_log_path};
use crate::app::AppContext;
use crate::domain::{AppError, InterpreterPath, JobInvocation, interpreter};
use crate::ports::{JobInvoker, LogSink};

/// Options for the run command. Unset fields fall back to the config.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Override the job script.
    pub script: Option<PathBuf>,
    /// Override the log file.
    pub log: Option<PathBuf>,
    /// Hold the log lock for the duration of the run.
    pub exclusive: bool,
    /// Replace the configured job arguments when non-empty.
    pub args: Vec<String>,
}

/// Result of a single job run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub exit_code: i32,
    pub log_path: PathBuf,
    pub job: JobInvocation,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Execute the job against the file log sink.
///
/// The log directory is created before anything is launched; failing to create
/// it aborts the run.
pub fn execute<I>(ctx: &AppContext, options: RunOptions, invoker: &I) -> Result<RunResult, AppError>
where
    I: JobInvoker + ?Sized,
{
    let config = ctx.config();
    let log_relative = options.log.clone().unwrap_or_else(|| config.log.path.clone());
    let log_path = ensure_log_path(ctx.project_root(), &log_relative)?;

    let _lock = if options.exclusive || config.log.exclusive {
        Some(LogLock::acquire(&log_path)?)
    } else {
        None
    };

    let mut sink = FileLogSink::open(&log_path)?;
    let job = build_invocation(ctx, &options);
    let exit_code = run_with_sink(&job, invoker, &mut sink)?;

    Ok(RunResult { exit_code, log_path, job })
}

/// Resolve the interpreter and assemble the invocation for this project.
pub fn build_invocation(ctx: &AppContext, options: &RunOptions) -> JobInvocation {
    let config = ctx.config();
    let interpreter = interpreter::resolve(ctx.project_root(), &config.job.interpreter);
    let script = options.script.as_ref().unwrap_or(&config.job.script);
    let args = if options.args.is_empty() { config.job.args.clone() } else { options.args.clone() };

    JobInvocation::new(interpreter, ctx.project_root(), script, args)
}

/// Write the run header, invoke the job, then write the trailing exit-code line.
pub fn run_with_sink<I>(
    job: &JobInvocation,
    invoker: &I,
    sink: &mut dyn LogSink,
) -> Result<i32, AppError>
where
    I: JobInvoker + ?Sized,
{
    if let InterpreterPath::Fallback(name) = &job.interpreter {
        sink.append_line(&format!("Project interpreter not found; using '{}' from PATH", name))?;
    }
    sink.append_line(&format!("Running: {} (cwd: {})", job, job.working_dir.display()))?;

    match invoker.run(job, sink) {
        Ok(code) => {
            if let Err(log_err) = sink.append_line(&format!("Return code: {}", code)) {
                tracing::warn!(error = %log_err, code, "could not record return code in log");
            }
            Ok(code)
        }
        Err(err @ AppError::JobLaunch { .. }) => {
            if let Err(log_err) = sink.append_line(&format!("Failed to launch job: {}", err)) {
                tracing::warn!(error = %log_err, "could not record launch failure in log");
            }
            Err(err)
        }
        Err(err) => Err(err),
    }
}
