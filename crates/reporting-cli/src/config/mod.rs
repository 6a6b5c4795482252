//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── postgres: PgConfig                 # Database URL and pool sizing
//! ├── reference_data: ReferenceDataConfig # Rights service endpoint
//! └── command: Command                   # What to do
//! ```
//!
//! All options can be provided via CLI arguments or environment variables.

mod command;

use std::process;

use anyhow::Context;
use clap::Parser;
use reporting_postgres::PgConfig;
use reporting_service::ReferenceDataConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use self::command::{Command, ListArgs, MapParamsArgs, NameArgs, UploadArgs};
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "reporting")]
#[command(about = "Report template management")]
#[command(version)]
pub struct Cli {
    /// Database connection and pool configuration.
    #[clap(flatten)]
    pub postgres: PgConfig,

    /// Rights service configuration.
    #[clap(flatten)]
    pub reference_data: ReferenceDataConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.postgres
            .validate()
            .context("invalid database configuration")?;
        Ok(())
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            database_url = %self.postgres.database_url_masked(),
            max_connections = self.postgres.max_connections,
            reference_data_url = %self.reference_data.base_url,
            reference_data_timeout = ?self.reference_data.effective_timeout(),
            "Configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
