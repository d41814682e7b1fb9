//! Core ledger logic for Finledger.
//!
//! This crate holds the domain types, balance rules, and ledger services.
//! Storage is reached only through the traits in [`ledger::store`]; the
//! bundled [`ledger::MemoryLedgerStore`] backs tests and embedding, while
//! `finledger-db` provides the PostgreSQL implementation.
//!
//! # Modules
//!
//! - `account` - Account entity and the account ledger
//! - `transaction` - Transaction entity and the transaction ledger
//! - `admin` - Administrator operations over every account
//! - `auth` - Caller identity and ownership checks
//! - `ledger` - Balance rules, validation, errors, storage seam
//! - `user` - Users and roles

#[macro_use]
mod macros;

pub mod account;
pub mod admin;
pub mod auth;
pub mod ledger;
pub mod transaction;
pub mod user;

pub use account::{AccountLedger, AccountType};
pub use admin::AdminLedger;
pub use auth::{AuthContext, AuthorizationGuard};
pub use ledger::{LedgerError, MemoryLedgerStore};
pub use transaction::{TransactionCategory, TransactionLedger, TransactionType};
pub use user::{User, UserRole};
