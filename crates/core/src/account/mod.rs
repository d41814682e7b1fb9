//! User-owned accounts.

pub(crate) mod service;
mod types;


pub use service::AccountLedger;
pub use types::{Account, AccountType, AccountView, CreateAccountInput, UpdateAccountInput};
