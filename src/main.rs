use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use riskmap::cli::Cli;
use riskmap::errors::RiskError;
use riskmap::observability::init_tracing;

/// Exit status for a failed command: 2 when something was not found, 1 otherwise.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<RiskError>() {
        Some(risk) if risk.is_not_found() => 2,
        _ => 1,
    }
}

fn status_for(err: &anyhow::Error) -> u16 {
    err.downcast_ref::<RiskError>()
        .map(RiskError::status_code)
        .unwrap_or(500)
}

fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(riskmap::commands::run(cli))
}

// Main orchestrator function
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error ({}): {:#}", status_for(&err), err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}
