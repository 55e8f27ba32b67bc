mod job_invoker;
mod log_sink;
mod task_scheduler;

pub use job_invoker::JobInvoker;
pub use log_sink::LogSink;
pub use task_scheduler::TaskScheduler;
