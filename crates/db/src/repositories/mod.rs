//! Repository implementations for data access.
//!
//! The ledger reaches PostgreSQL only through [`PgLedgerStore`], which
//! implements the storage traits defined in `finledger-core`.

mod convert;
pub mod ledger;
pub mod user;

pub use ledger::{PgLedgerSession, PgLedgerStore};
pub use user::UserRepository;

use finledger_core::LedgerError;
use sea_orm::{DbErr, SqlErr};

/// Maps a database error onto the ledger taxonomy.
///
/// Unique-constraint violations become `DuplicateResource`; everything else
/// is a `Repository` error.
pub(crate) fn repository_error(err: DbErr) -> LedgerError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => LedgerError::DuplicateResource(detail),
        _ => LedgerError::repository(err.to_string()),
    }
}
