//! Subcommand execution.

mod migrate;
mod template;

use anyhow::Context;
use reporting_postgres::PgClient;
use reporting_service::{ReferenceDataClient, TemplateService};
use serde::Serialize;

use crate::config::{Cli, Command};

/// Runs the parsed command against a database that has answered a test query.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let pg = PgClient::new_with_test(cli.postgres)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::Migrate => migrate::run(&pg).await,
        Command::MigrationStatus => migrate::status(&pg).await,
        command => {
            let rights = ReferenceDataClient::new(cli.reference_data)
                .context("failed to create reference-data client")?;
            let service = TemplateService::new(pg, rights);
            template::execute(&service, command).await
        }
    }
}

/// Writes a value to stdout as pretty-printed JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
