//! Register command implementation.

use crate::app::AppContext;
use crate::app::api::RegisterOptions;
use crate::domain::schedule::parse_weekday;
use crate::domain::{AppError, Cadence};

pub fn run_register(
    ctx: &AppContext,
    name: Option<String>,
    time: Option<String>,
    daily: bool,
    weekly: Option<String>,
    dry_run: bool,
) -> Result<i32, AppError> {
    let cadence = match (daily, weekly) {
        (_, Some(day)) => Some(Cadence::Weekly(parse_weekday(&day)?)),
        (true, None) => Some(Cadence::Daily),
        (false, None) => None,
    };
    let options = RegisterOptions { task_name: name, start_time: time, cadence, dry_run };
    let outcome = crate::app::api::register(ctx, options)?;
    let spec = &outcome.spec;

    if outcome.result.is_none() {
        println!("Task: {}", spec.task_name);
        println!("Cadence: {}", spec.cadence);
        println!("Time: {}", spec.start_time);
        println!("Command: {}", spec.command.elements().collect::<Vec<_>>().join(" "));
        return Ok(0);
    }

    println!(
        "✅ Registered task '{}' ({} at {})",
        spec.task_name, spec.cadence, spec.start_time
    );
    Ok(0)
}
