use anyhow::Context;
use reporting_postgres::{PgClient, PgClientMigrationExt};

use crate::TRACING_TARGET_COMMAND;

pub async fn run(pg: &PgClient) -> anyhow::Result<()> {
    let result = pg
        .run_pending_migrations()
        .await
        .context("failed to apply migrations")?;

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        applied = result.processed_versions.len(),
        last_version = result.last_processed_version(),
        duration = ?result.duration,
        "Migrations completed"
    );

    for version in &result.processed_versions {
        println!("applied {version}");
    }
    Ok(())
}

pub async fn status(pg: &PgClient) -> anyhow::Result<()> {
    let status = pg
        .get_migration_status()
        .await
        .context("failed to read migration status")?;

    for version in &status.applied_versions {
        println!("applied {version}");
    }
    for version in &status.pending_versions {
        println!("pending {version}");
    }
    Ok(())
}
