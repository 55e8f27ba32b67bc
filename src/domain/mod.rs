pub mod config;
pub mod error;
pub mod interpreter;
pub mod job;
pub mod schedule;

pub use config::RunnerConfig;
pub use error::AppError;
pub use interpreter::{InterpreterPath, InterpreterSettings};
pub use job::JobInvocation;
pub use schedule::{
    Cadence, CommandLine, RegisteredTask, RegistrationResult, ScheduledTaskSpec, StartTime,
    TaskName,
};
