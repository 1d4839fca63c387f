//! # tdesk CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tdesk_cli::gate::{run_gate, GateArgs};
use tdesk_cli::notice::{run_notice, NoticeArgs};
use tdesk_cli::policy::{run_policy, PolicyArgs};

/// TDesk CLI
///
/// Offline tooling for the TDesk travel-request stack: notice-period
/// evaluation, verification-gate checks, and policy file validation.
#[derive(Parser, Debug)]
#[command(name = "tdesk", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a travel date against the notice rules of a policy file.
    Notice(NoticeArgs),

    /// Evaluate the verification gate for a user snapshot.
    Gate(GateArgs),

    /// Policy file operations (validate).
    Policy(PolicyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Notice(args) => run_notice(&args),
        Commands::Gate(args) => run_gate(&args),
        Commands::Policy(args) => run_policy(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
