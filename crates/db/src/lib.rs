//! PostgreSQL storage for Finledger.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - [`PgLedgerStore`], the database implementation of the ledger storage traits
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{PgLedgerSession, PgLedgerStore, UserRepository};

use std::time::Duration;

use finledger_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Establishes a connection pool sized from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool ready"
    );
    Ok(db)
}
