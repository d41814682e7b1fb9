//! Transactions and the balance bookkeeping around them.

mod service;
mod types;


#[cfg(test)]
mod service_props;

pub use service::TransactionLedger;
pub use types::{
    CreateTransactionInput, Transaction, TransactionCategory, TransactionType, TransactionView,
    UpdateTransactionInput,
};
