use std::sync::Mutex;

use crate::domain::{AppError, JobInvocation};
use crate::ports::{JobInvoker, LogSink};

pub struct FakeJobInvoker {
    pub output: Vec<u8>,
    pub exit_code: i32,
    pub launch_fails: bool,
    pub invocations: Mutex<Vec<JobInvocation>>,
}

impl FakeJobInvoker {
    pub fn exiting(exit_code: i32, output: &str) -> Self {
        Self {
            output: output.as_bytes().to_vec(),
            exit_code,
            launch_fails: false,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn unlaunchable() -> Self {
        Self { launch_fails: true, ..Self::exiting(0, "") }
    }

    pub fn last_invocation(&self) -> Option<JobInvocation> {
        self.invocations.lock().unwrap().last().cloned()
    }
}

impl JobInvoker for FakeJobInvoker {
    fn run(&self, job: &JobInvocation, sink: &mut dyn LogSink) -> Result<i32, AppError> {
        self.invocations.lock().unwrap().push(job.clone());
        if self.launch_fails {
            return Err(AppError::JobLaunch {
                program: job.interpreter.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        sink.append(&self.output)?;
        Ok(self.exit_code)
    }
}
