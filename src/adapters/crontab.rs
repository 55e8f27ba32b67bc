//! `crontab`-backed scheduler.
//!
//! Each managed entry ends with a `# schedrun:<task name>` tag. Registration
//! rewrites the whole table with any previously tagged line for the same name
//! dropped, which makes it an upsert.

use std::io::Write;
use std::process::{Command, Stdio};

use chrono::Weekday;

use crate::domain::{
    AppError, Cadence, CommandLine, RegisteredTask, RegistrationResult, ScheduledTaskSpec,
    StartTime, TaskName,
};
use crate::ports::TaskScheduler;

pub const DEFAULT_CRONTAB_PROGRAM: &str = "crontab";

const TAG: &str = " # schedrun:";

#[derive(Debug, Clone)]
pub struct CrontabScheduler {
    program: String,
}

impl Default for CrontabScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_CRONTAB_PROGRAM)
    }
}

impl CrontabScheduler {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn command_error(&self, details: impl Into<String>) -> AppError {
        AppError::SchedulerCommand { program: self.program.clone(), details: details.into() }
    }

    fn read_table(&self) -> Result<String, AppError> {
        let output = Command::new(&self.program)
            .arg("-l")
            .output()
            .map_err(|e| self.command_error(format!("Failed to execute: {}", e)))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_ascii_lowercase().contains("no crontab") {
            return Ok(String::new());
        }
        Err(self.command_error(format!("crontab -l failed: {}", stderr.trim())))
    }

    /// Install `table`, returning the facility's exit code and stderr.
    fn write_table(&self, table: &str) -> Result<(i32, String), AppError> {
        let mut child = Command::new(&self.program)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.command_error(format!("Failed to execute: {}", e)))?;

        // Wait on the child even when the write fails so it is always reaped.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(table.as_bytes()),
            None => Ok(()),
        };
        let output = child.wait_with_output()?;
        if let Err(e) = written {
            if output.status.success() {
                return Err(e.into());
            }
            tracing::debug!(error = %e, "crontab exited before reading the table");
        }

        Ok((
            output.status.code().unwrap_or(1),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

impl TaskScheduler for CrontabScheduler {
    fn create_or_replace(&self, spec: &ScheduledTaskSpec) -> Result<RegistrationResult, AppError> {
        let entry = render_entry(spec);
        let current = self.read_table()?;
        let mut lines: Vec<&str> =
            current.lines().filter(|line| !is_tagged(line, &spec.task_name)).collect();
        lines.push(&entry);

        let table = render_table(&lines);
        let (exit_code, stderr) = self.write_table(&table)?;
        tracing::debug!(task = %spec.task_name, exit_code, "crontab install finished");

        Ok(RegistrationResult { success: exit_code == 0, exit_code, details: stderr })
    }

    fn query(&self, name: &TaskName) -> Result<Option<RegisteredTask>, AppError> {
        let table = self.read_table()?;
        Ok(table
            .lines()
            .find(|line| is_tagged(line, name))
            .and_then(|line| parse_entry(line, name)))
    }

    fn delete(&self, name: &TaskName) -> Result<bool, AppError> {
        let current = self.read_table()?;
        let kept: Vec<&str> = current.lines().filter(|line| !is_tagged(line, name)).collect();
        if kept.len() == current.lines().count() {
            return Ok(false);
        }

        let (exit_code, stderr) = self.write_table(&render_table(&kept))?;
        if exit_code != 0 {
            return Err(self.command_error(format!(
                "crontab install failed (exit code {}): {}",
                exit_code, stderr
            )));
        }
        Ok(true)
    }
}

fn render_table(lines: &[&str]) -> String {
    let mut table = lines.join("\n");
    table.push('\n');
    table
}

fn is_tagged(line: &str, name: &TaskName) -> bool {
    line.rsplit_once(TAG).is_some_and(|(_, tagged)| tagged.trim_end() == name.as_str())
}

/// Render one crontab line for `spec`.
pub fn render_entry(spec: &ScheduledTaskSpec) -> String {
    let day_of_week = match spec.cadence {
        Cadence::Daily => "*".to_string(),
        Cadence::Weekly(day) => day.num_days_from_sunday().to_string(),
    };
    format!(
        "{} {} * * {} {}{}{}",
        spec.start_time.minute(),
        spec.start_time.hour(),
        day_of_week,
        render_command(&spec.command),
        TAG,
        spec.task_name
    )
}

/// Quote every element for `/bin/sh` and escape cron's `%` newline marker.
pub fn render_command(command: &CommandLine) -> String {
    command.elements().map(shell_quote).collect::<Vec<_>>().join(" ").replace('%', "\\%")
}

fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || "-_./:=@+,".contains(c));
    if plain { value.to_string() } else { format!("'{}'", value.replace('\'', "'\\''")) }
}

fn parse_entry(line: &str, name: &TaskName) -> Option<RegisteredTask> {
    let (schedule, _) = line.rsplit_once(TAG)?;
    let mut fields = schedule.splitn(6, ' ');
    let minute: u32 = fields.next()?.parse().ok()?;
    let hour: u32 = fields.next()?.parse().ok()?;
    let (day_of_month, month) = (fields.next()?, fields.next()?);
    if day_of_month != "*" || month != "*" {
        return None;
    }
    let cadence = match fields.next()? {
        "*" => Cadence::Daily,
        dow => Cadence::Weekly(weekday_from_sunday(dow.parse().ok()?)?),
    };
    let command = fields.next()?.trim().to_string();

    Some(RegisteredTask {
        task_name: name.clone(),
        cadence,
        start_time: StartTime::from_hm(hour, minute)?,
        command,
    })
}

fn weekday_from_sunday(n: u32) -> Option<Weekday> {
    match n {
        0 | 7 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spec(name: &str, cadence: Cadence, time: &str) -> ScheduledTaskSpec {
        ScheduledTaskSpec {
            task_name: TaskName::new(name).unwrap(),
            cadence,
            start_time: time.parse().unwrap(),
            command: CommandLine::new(
                "/opt/my tools/schedrun",
                vec!["run".into(), "--project-root".into(), "/srv/shop export".into()],
            ),
        }
    }

    #[test]
    fn renders_weekly_entry_with_quoted_paths() {
        let entry = render_entry(&spec("X", Cadence::Weekly(Weekday::Fri), "02:00"));
        assert_eq!(
            entry,
            "0 2 * * 5 '/opt/my tools/schedrun' run --project-root '/srv/shop export' # schedrun:X"
        );
    }

    #[test]
    fn renders_daily_entry() {
        let entry = render_entry(&spec("daily-export", Cadence::Daily, "09:30"));
        assert!(entry.starts_with("30 9 * * * "));
        assert!(entry.ends_with(" # schedrun:daily-export"));
    }

    #[test]
    fn quoting_handles_single_quotes_and_percent() {
        let command = CommandLine::new("/bin/job", vec!["it's".into(), "50%".into()]);
        assert_eq!(render_command(&command), "/bin/job 'it'\\''s' '50\\%'");
    }

    #[test]
    fn tag_matching_is_exact() {
        let name = TaskName::new("export").unwrap();
        assert!(is_tagged("0 2 * * * cmd # schedrun:export", &name));
        assert!(!is_tagged("0 2 * * * cmd # schedrun:export-2", &name));
        assert!(!is_tagged("0 2 * * * cmd", &name));
    }

    #[test]
    fn spaced_names_round_trip_through_the_tag() {
        let spec = spec("Shop Export", Cadence::Daily, "02:00");
        let entry = render_entry(&spec);

        assert!(is_tagged(&entry, &spec.task_name));
        assert!(is_tagged(&format!("{entry}  "), &spec.task_name));
        assert!(!is_tagged(&entry, &TaskName::new("Shop").unwrap()));
        assert!(TaskName::new("Shop Export ").is_err());
    }

    #[test]
    fn parses_rendered_entry() {
        let spec = spec("Shop Weekly", Cadence::Weekly(Weekday::Sun), "23:45");
        let task = parse_entry(&render_entry(&spec), &spec.task_name).unwrap();

        assert_eq!(task.cadence, Cadence::Weekly(Weekday::Sun));
        assert_eq!(task.start_time.to_string(), "23:45");
        assert!(task.command.starts_with("'/opt/my tools/schedrun' run"));
    }

    #[test]
    fn hand_edited_entries_are_not_reported() {
        let name = TaskName::new("x").unwrap();
        assert!(parse_entry("*/5 * * * * cmd # schedrun:x", &name).is_none());
        assert!(parse_entry("0 2 1 * * cmd # schedrun:x", &name).is_none());
    }

    proptest! {
        #[test]
        fn rendered_entries_keep_five_schedule_fields(
            hour in 0u32..24,
            minute in 0u32..60,
            day in 0u32..7,
            arg in "[ -~]{0,24}",
        ) {
            let weekday = weekday_from_sunday(day).unwrap();
            let spec = ScheduledTaskSpec {
                task_name: TaskName::new("prop").unwrap(),
                cadence: Cadence::Weekly(weekday),
                start_time: StartTime::from_hm(hour, minute).unwrap(),
                command: CommandLine::new("/bin/schedrun", vec![arg]),
            };
            let entry = render_entry(&spec);
            let fields: Vec<&str> = entry.splitn(6, ' ').collect();

            prop_assert_eq!(fields[0], minute.to_string());
            prop_assert_eq!(fields[1], hour.to_string());
            prop_assert_eq!(fields[4], day.to_string());
            prop_assert!(!entry.contains('\n'));
            prop_assert!(is_tagged(&entry, &spec.task_name));
        }
    }
}
