use crate::domain::{AppError, JobInvocation};

use super::LogSink;

/// Runs a job to completion, streaming its merged output into a sink.
pub trait JobInvoker {
    /// Run the job once and return the child's exit code verbatim.
    fn run(&self, job: &JobInvocation, sink: &mut dyn LogSink) -> Result<i32, AppError>;
}
