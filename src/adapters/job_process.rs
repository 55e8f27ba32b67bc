//! Child-process job invoker.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::domain::{AppError, JobInvocation};
use crate::ports::{JobInvoker, LogSink};

const READ_CHUNK: usize = 8 * 1024;

/// Runs the job as a child process and merges stdout/stderr into the sink.
#[derive(Debug, Clone, Default)]
pub struct ProcessJobInvoker;

impl ProcessJobInvoker {
    pub fn new() -> Self {
        Self
    }
}

impl JobInvoker for ProcessJobInvoker {
    fn run(&self, job: &JobInvocation, sink: &mut dyn LogSink) -> Result<i32, AppError> {
        let mut command = Command::new(job.interpreter.program());
        command
            .arg(&job.script)
            .args(&job.args)
            .current_dir(&job.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| AppError::JobLaunch {
            program: job.interpreter.to_string(),
            source,
        })?;
        tracing::debug!(pid = child.id(), job = %job, "job started");

        let (tx, rx) = mpsc::channel::<Vec<u8>>();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(forward(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(forward(stderr, tx.clone()));
        }
        drop(tx);

        // Keep draining after a sink failure so the child never blocks on a full pipe.
        let mut sink_result = Ok(());
        for chunk in rx {
            if sink_result.is_ok() {
                sink_result = sink.append(&chunk);
            }
        }

        let status = child.wait()?;
        for reader in readers {
            reader.join().map_err(|_| io::Error::other("output reader thread panicked"))??;
        }
        sink_result?;

        let code = exit_code(status);
        tracing::debug!(code, "job exited");
        Ok(code)
    }
}

fn forward<R>(mut stream: R, tx: Sender<Vec<u8>>) -> JoinHandle<io::Result<()>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = match stream.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if tx.send(buf[..n].to_vec()).is_err() {
                return Ok(());
            }
        }
    })
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.code().or_else(|| status.signal().map(|signal| 128 + signal)).unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
