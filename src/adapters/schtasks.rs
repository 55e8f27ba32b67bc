//! Windows Task Scheduler (`schtasks.exe`) scheduler.

use std::process::Command;

use chrono::Weekday;

use crate::domain::schedule::weekday_code;
use crate::domain::{
    AppError, Cadence, CommandLine, RegisteredTask, RegistrationResult, ScheduledTaskSpec,
    StartTime, TaskName,
};
use crate::ports::TaskScheduler;

pub const DEFAULT_SCHTASKS_PROGRAM: &str = "schtasks";

#[derive(Debug, Clone)]
pub struct SchtasksScheduler {
    program: String,
}

impl Default for SchtasksScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SCHTASKS_PROGRAM)
    }
}

impl SchtasksScheduler {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn run(&self, args: &[String]) -> Result<std::process::Output, AppError> {
        Command::new(&self.program).args(args).output().map_err(|e| AppError::SchedulerCommand {
            program: self.program.clone(),
            details: format!("Failed to execute: {}", e),
        })
    }
}

impl TaskScheduler for SchtasksScheduler {
    fn create_or_replace(&self, spec: &ScheduledTaskSpec) -> Result<RegistrationResult, AppError> {
        let output = self.run(&create_args(spec))?;
        let exit_code = output.status.code().unwrap_or(1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let details = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };

        Ok(RegistrationResult { success: output.status.success(), exit_code, details })
    }

    fn query(&self, name: &TaskName) -> Result<Option<RegisteredTask>, AppError> {
        let output = self.run(&[
            "/Query".to_string(),
            "/TN".to_string(),
            name.to_string(),
            "/XML".to_string(),
        ])?;
        if !output.status.success() {
            // schtasks exits 1 for unknown task names; the message is localized.
            tracing::debug!(
                task = %name,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "schtasks query returned no task"
            );
            return Ok(None);
        }

        Ok(parse_task_xml(name, &String::from_utf8_lossy(&output.stdout)))
    }

    fn delete(&self, name: &TaskName) -> Result<bool, AppError> {
        if self.query(name)?.is_none() {
            return Ok(false);
        }

        let output = self.run(&[
            "/Delete".to_string(),
            "/TN".to_string(),
            name.to_string(),
            "/F".to_string(),
        ])?;
        if !output.status.success() {
            return Err(AppError::SchedulerCommand {
                program: self.program.clone(),
                details: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(true)
    }
}

/// Structured argument list for `schtasks /Create` in force-overwrite mode.
pub fn create_args(spec: &ScheduledTaskSpec) -> Vec<String> {
    let mut args = vec![
        "/Create".to_string(),
        "/F".to_string(),
        "/TN".to_string(),
        spec.task_name.to_string(),
    ];
    match spec.cadence {
        Cadence::Daily => args.extend(["/SC".to_string(), "DAILY".to_string()]),
        Cadence::Weekly(day) => args.extend([
            "/SC".to_string(),
            "WEEKLY".to_string(),
            "/D".to_string(),
            weekday_code(day).to_string(),
        ]),
    }
    args.extend([
        "/ST".to_string(),
        spec.start_time.to_string(),
        "/TR".to_string(),
        render_task_run(&spec.command),
    ]);
    args
}

/// Render the `/TR` value. Elements with whitespace are double-quoted.
pub fn render_task_run(command: &CommandLine) -> String {
    command.elements().map(quote_element).collect::<Vec<_>>().join(" ")
}

fn quote_element(value: &str) -> String {
    if !value.is_empty() && !value.chars().any(|c| c.is_whitespace() || c == '"') {
        return value.to_string();
    }
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Read cadence, start time and command back out of `schtasks /Query /XML`.
pub fn parse_task_xml(name: &TaskName, xml: &str) -> Option<RegisteredTask> {
    let boundary = element_text(xml, "StartBoundary")?;
    let (_, time) = boundary.split_once('T')?;
    let start_time: StartTime = time.get(..5)?.parse().ok()?;

    let cadence = if xml.contains("<ScheduleByWeek>") {
        let days = element_text(xml, "DaysOfWeek")?;
        let day = [
            ("Monday", Weekday::Mon),
            ("Tuesday", Weekday::Tue),
            ("Wednesday", Weekday::Wed),
            ("Thursday", Weekday::Thu),
            ("Friday", Weekday::Fri),
            ("Saturday", Weekday::Sat),
            ("Sunday", Weekday::Sun),
        ]
        .into_iter()
        .find(|(tag, _)| days.contains(&format!("<{tag}")))?
        .1;
        Cadence::Weekly(day)
    } else if xml.contains("<ScheduleByDay>") {
        Cadence::Daily
    } else {
        return None;
    };

    let mut command = unescape(element_text(xml, "Command").unwrap_or_default());
    if let Some(arguments) = element_text(xml, "Arguments") {
        command.push(' ');
        command.push_str(&unescape(arguments));
    }

    Some(RegisteredTask { task_name: name.clone(), cadence, start_time, command })
}

fn element_text<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = start + xml[start..].find(&close)?;
    Some(xml[start..end].trim())
}

fn unescape(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
