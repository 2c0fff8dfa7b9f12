//! Replay and audit tool for recorded combats.
//!
//! Exit codes: 0 success, 2 invalid action, 3 invariant violation, 4 content,
//! configuration or I/O error, 5 audit divergence.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use commands::{Actions, Audit, CheckContent, Run};
use runtime::{EXIT_CONTENT, RuntimeConfig, RuntimeError};

#[derive(Parser)]
#[command(name = "replay")]
#[command(about = "Replay, audit and inspect recorded combats", long_about = None)]
#[command(version)]
struct Cli {
    /// Content data directory (overrides COMBAT_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay an action log and print the final report
    Run(Run),

    /// Replay an action log and compare it against reference observations
    Audit(Audit),

    /// List the actions available after a prefix of an action log
    Actions(Actions),

    /// Load and validate the content tables
    CheckContent(CheckContent),
}

fn main() -> ExitCode {
    // Load .env file if it exists (for COMBAT_* variables)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = match logging::init(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {e:#}", console::style("error:").red().bold());
            return ExitCode::from(EXIT_CONTENT as u8);
        }
    };

    let mut config = RuntimeConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let result = match cli.command {
        Command::Run(cmd) => cmd.execute(config),
        Command::Audit(cmd) => cmd.execute(config),
        Command::Actions(cmd) => cmd.execute(config),
        Command::CheckContent(cmd) => cmd.execute(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", console::style("error:").red().bold());
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

/// Runtime failures carry their own code; anything else is a content/IO problem.
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<RuntimeError>())
        .map_or(EXIT_CONTENT, RuntimeError::exit_code)
}
