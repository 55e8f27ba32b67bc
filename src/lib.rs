//! schedrun: run a scheduled export job with interpreter fallback, append-only
//! logging, and idempotent OS task registration.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use app::api::{
    RegisterOptions, RegisterOutcome, RunOptions, RunResult, StatusOutput, open, register,
    resolve_interpreter, run, status, unregister,
};
pub use domain::{
    AppError, Cadence, InterpreterPath, RegisteredTask, RegistrationResult, ScheduledTaskSpec,
    StartTime, TaskName,
};
