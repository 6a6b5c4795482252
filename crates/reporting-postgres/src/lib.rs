#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./migrations");

// Tracing target constants for consistent logging.

/// Tracing target for client initialization and configuration.
pub const TRACING_TARGET_CLIENT: &str = "reporting_postgres::client";

/// Tracing target for query execution.
pub const TRACING_TARGET_QUERY: &str = "reporting_postgres::queries";

/// Tracing target for migration application and status checks.
pub const TRACING_TARGET_MIGRATION: &str = "reporting_postgres::migrations";

/// Tracing target for connection establishment and pool management.
pub const TRACING_TARGET_CONNECTION: &str = "reporting_postgres::connection";

mod client;
mod error;
pub mod model;
pub mod query;
mod schema;
pub mod types;

pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::migrate;
pub use crate::client::{
    ConnectionPool, MigrationResult, MigrationStatus, PgClient, PgClientMigrationExt, PgConfig,
    PgConn, PgPoolStatus, PooledConnection, get_migration_status, run_pending_migrations,
};
pub use crate::error::{BoxError, PgError, PgResult};
