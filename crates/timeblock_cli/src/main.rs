//! Command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and bootstrap logging before any command runs.
//! - Map command failures to a single stderr line and a non-zero exit code.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "timeblock", version, about = "Normalize time expressions in notes")]
struct Cli {
    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// Absolute directory for rolling log files; logs go to stderr otherwise
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format files in place, or stdin to stdout
    Format(commands::format::FormatArgs),
    /// Watch a notes folder and format files when they change
    Watch(commands::watch::WatchArgs),
    /// Print text with canonical timeblocks marked as ==HH:MM - HH:MM==
    Highlight(commands::highlight::HighlightArgs),
    /// Show or initialize formatter settings
    Settings(commands::settings::SettingsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Format(args) => commands::format::run(args),
        Commands::Watch(args) => commands::watch::run(args).map(|()| ExitCode::SUCCESS),
        Commands::Highlight(args) => commands::highlight::run(args).map(|()| ExitCode::SUCCESS),
        Commands::Settings(args) => commands::settings::run(args).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> Result<(), String> {
    match &cli.log_dir {
        Some(dir) => {
            let dir = dir
                .to_str()
                .ok_or_else(|| format!("log dir is not UTF-8: {}", dir.display()))?;
            timeblock_core::init_logging(&cli.log_level, dir)
        }
        None => timeblock_core::init_stderr_logging(&cli.log_level),
    }
}
