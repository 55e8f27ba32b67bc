//! CLI Adapter.

mod register;
mod run;
mod status;

use std::path::PathBuf;

use crate::domain::AppError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schedrun")]
#[command(version)]
#[command(
    about = "Run the export job with logging and manage its OS scheduled task",
    long_about = None
)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "SCHEDRUN_PROJECT_ROOT")]
    project_root: Option<PathBuf>,
    /// Config file (defaults to <project-root>/schedrun.toml when present)
    #[arg(long, global = true, env = "SCHEDRUN_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the job once and append its output to the log
    #[clap(visible_alias = "r")]
    Run {
        /// Job script (relative to the project root)
        #[arg(long)]
        script: Option<PathBuf>,
        /// Log file (relative to the project root)
        #[arg(long)]
        log: Option<PathBuf>,
        /// Refuse to run while another run holds the log
        #[arg(long)]
        exclusive: bool,
        /// Arguments passed to the job script
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Print the interpreter a run would use
    Resolve,
    /// Create or replace the OS scheduled task
    #[clap(visible_alias = "reg")]
    Register {
        /// Task name
        #[arg(short, long)]
        name: Option<String>,
        /// Start time (HH:MM, 24-hour)
        #[arg(short, long)]
        time: Option<String>,
        /// Run every day
        #[arg(long, conflicts_with = "weekly")]
        daily: bool,
        /// Run once a week on this day (mon..sun)
        #[arg(long, value_name = "DAY")]
        weekly: Option<String>,
        /// Print the task definition without registering it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the registered task
    #[clap(visible_alias = "st")]
    Status {
        /// Task name
        #[arg(short, long)]
        name: Option<String>,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the OS scheduled task
    Unregister {
        /// Task name
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<i32, AppError> =
        crate::app::api::open(cli.project_root.as_deref(), cli.config.as_deref()).and_then(
            |ctx| match cli.command {
                Commands::Run { script, log, exclusive, args } => {
                    run::run_job(&ctx, script, log, exclusive, args)
                }
                Commands::Resolve => {
                    println!("{}", crate::app::api::resolve_interpreter(&ctx));
                    Ok(0)
                }
                Commands::Register { name, time, daily, weekly, dry_run } => {
                    register::run_register(&ctx, name, time, daily, weekly, dry_run)
                }
                Commands::Status { name, json } => status::run_status(&ctx, name, json),
                Commands::Unregister { name } => status::run_unregister(&ctx, name).map(|_| 0),
            },
        );

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schedrun=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
