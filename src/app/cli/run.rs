//! Run command implementation.

use std::path::PathBuf;

use crate::app::AppContext;
use crate::app::api::RunOptions;
use crate::domain::AppError;

pub fn run_job(
    ctx: &AppContext,
    script: Option<PathBuf>,
    log: Option<PathBuf>,
    exclusive: bool,
    args: Vec<String>,
) -> Result<i32, AppError> {
    let options = RunOptions { script, log, exclusive, args };
    let result = crate::app::api::run(ctx, options)?;

    if result.success() {
        println!("✅ Job succeeded (exit code 0). Log: {}", result.log_path.display());
    } else {
        println!(
            "❌ Job failed with exit code {}. Log: {}",
            result.exit_code,
            result.log_path.display()
        );
    }
    Ok(result.exit_code)
}
