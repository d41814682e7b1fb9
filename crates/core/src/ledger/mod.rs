//! Balance rules, validation, errors, and the storage seam shared by the
//! account, transaction, and administration ledgers.

pub mod balance;
pub mod error;
pub mod memory;
pub mod store;
pub mod validation;

pub use error::{LedgerError, ResourceKind};
pub use memory::{MemoryLedgerStore, MemorySession};
pub use store::{
    AccountRepository, LedgerSession, LedgerStore, TransactionRepository, UserDirectory,
};
