//! Administration ledger: system-wide account management for administrators.

mod service;

pub use service::AdminLedger;

#[cfg(test)]
mod tests;
