//! Database migration runner for Finledger.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The database is taken from `DATABASE_URL` (or `-u <url>`).

use finledger_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // sea-orm-migration installs its own tracing subscriber
    cli::run_cli(Migrator).await;
}
