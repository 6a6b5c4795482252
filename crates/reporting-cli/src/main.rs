#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "reporting_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "reporting_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "reporting_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "reporting_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "command completed successfully"
        );
        process::exit(0);
    };

    let message_key = error
        .downcast_ref::<reporting_service::Error>()
        .and_then(reporting_service::Error::message_key)
        .map(|key| key.as_str());

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            message_key,
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    command::execute(cli).await
}
