//! release-automerge binary

mod cli;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() -> anyhow::Result<()> {
    // RUNNER_DEBUG is set when a workflow is re-run with debug logging
    let default_filter = if std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1") {
        "release_automerge=debug"
    } else {
        "release_automerge=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();
    init_tracing().context("Failed to initialize logging")?;

    match cli::run_automerge(&args).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            // Workflow command: marks the step failed with this message
            anstream::println!("{}", cli::error_command(&err.to_string()));
            Ok(ExitCode::FAILURE)
        }
    }
}
