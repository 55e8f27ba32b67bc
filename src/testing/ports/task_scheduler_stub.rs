use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::adapters::crontab::render_command;
use crate::domain::{
    AppError, RegisteredTask, RegistrationResult, ScheduledTaskSpec, TaskName,
};
use crate::ports::TaskScheduler;

/// In-memory scheduler keyed by task name.
#[derive(Default)]
pub struct FakeScheduler {
    pub tasks: Mutex<BTreeMap<TaskName, ScheduledTaskSpec>>,
    /// When set, registrations are rejected with this exit code.
    pub reject_with: Option<i32>,
}

impl FakeScheduler {
    pub fn rejecting(exit_code: i32) -> Self {
        Self { reject_with: Some(exit_code), ..Self::default() }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }
}

impl TaskScheduler for FakeScheduler {
    fn create_or_replace(&self, spec: &ScheduledTaskSpec) -> Result<RegistrationResult, AppError> {
        if let Some(exit_code) = self.reject_with {
            return Ok(RegistrationResult {
                success: false,
                exit_code,
                details: "Access is denied.".into(),
            });
        }
        self.tasks.lock().unwrap().insert(spec.task_name.clone(), spec.clone());
        Ok(RegistrationResult { success: true, exit_code: 0, details: String::new() })
    }

    fn query(&self, name: &TaskName) -> Result<Option<RegisteredTask>, AppError> {
        Ok(self.tasks.lock().unwrap().get(name).map(|spec| RegisteredTask {
            task_name: spec.task_name.clone(),
            cadence: spec.cadence,
            start_time: spec.start_time,
            command: render_command(&spec.command),
        }))
    }

    fn delete(&self, name: &TaskName) -> Result<bool, AppError> {
        Ok(self.tasks.lock().unwrap().remove(name).is_some())
    }
}
