//! # univote CLI entry point
//!
//! Loads configuration, installs the tracing subscriber, and dispatches to
//! the subcommand handlers in [`univote::cli`].

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use univote::cli::{run_check, run_tally, CheckArgs, TallyArgs};
use univote::config::{AppConfig, TelemetryConfig};

/// University election administration.
///
/// Inspects exported elections, voter profiles and votes offline.
#[derive(Parser, Debug)]
#[command(name = "univote", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show an election's phase and whether a voter is eligible.
    Check(CheckArgs),

    /// Compile an election's results (administrator preview).
    Tally(TallyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("univote: {e}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("univote: invalid configuration: {e}");
        return ExitCode::from(2);
    }
    init_tracing(&config.telemetry);

    let result = match cli.command {
        Commands::Check(args) => run_check(&args).map(|report| {
            println!("{report}");
            if report.may_vote() {
                0
            } else {
                3
            }
        }),
        Commands::Tally(args) => run_tally(&args).map(|output| {
            print!("{}", output.rendered);
            0
        }),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("univote: {e}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let filter = match telemetry.env_filter() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new("info"),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if telemetry.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
