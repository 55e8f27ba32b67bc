mod job_invoker_stub;
mod log_sink_stub;
mod task_scheduler_stub;

pub use self::job_invoker_stub::FakeJobInvoker;
pub use self::log_sink_stub::{FailingLogSink, MemoryLogSink};
pub use self::task_scheduler_stub::FakeScheduler;
