pub mod crontab;
pub mod job_process;
pub mod log_file;
pub mod schtasks;

use crate::ports::TaskScheduler;

/// Scheduler adapter for the host platform, optionally pointed at a different binary.
pub fn platform_scheduler(program: Option<&str>) -> Box<dyn TaskScheduler> {
    if cfg!(windows) {
        return Box::new(program.map(|p| schtasks::SchtasksScheduler::new(p)).unwrap_or_default());
    }
    Box::new(program.map(|p| crontab::CrontabScheduler::new(p)).unwrap_or_default())
}
