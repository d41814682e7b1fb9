//! Ledger error types for validation, ownership, and storage failures.
//!
//! Every ledger operation fails with the most specific variant available.
//! Outer layers convert into [`AppError`] to produce a protocol response.

use std::fmt;

use finledger_shared::AppError;
use finledger_shared::types::{AccountId, TransactionId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

/// The kind of resource named in an ownership failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A user-owned account.
    Account,
    /// A transaction, owned through its account.
    Transaction,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Transaction => write!(f, "transaction"),
        }
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Identity Errors ==========
    /// No caller identity could be resolved.
    #[error("Caller is not authenticated")]
    NotAuthenticated,

    /// The caller's user id does not resolve to a user record.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    // ========== Lookup Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// A generic lookup or listing produced nothing.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    // ========== Ownership Errors ==========
    /// The caller does not own the resource.
    #[error("Access to {kind} {id} denied")]
    Unauthorized {
        /// Kind of resource the caller tried to reach.
        kind: ResourceKind,
        /// Identifier of that resource.
        id: String,
    },

    // ========== Business Rule Errors ==========
    /// An expense would drive the account balance below zero.
    #[error("Insufficient balance: current balance {balance}, required {required}")]
    InsufficientBalance {
        /// Balance at the time of the check.
        balance: Decimal,
        /// Amount the expense needed.
        required: Decimal,
    },

    /// A balance change would leave the storable money range.
    #[error("Balance {balance} cannot be changed by {delta}: result out of range")]
    BalanceOutOfRange {
        /// Balance before the change.
        balance: Decimal,
        /// Signed change that was refused.
        delta: Decimal,
    },

    /// Account balance cannot be negative.
    #[error("Balance cannot be negative: {0}")]
    InvalidBalance(Decimal),

    /// Transaction amount must be strictly positive.
    #[error("Amount must be positive: {0}")]
    InvalidAmount(Decimal),

    /// A name is blank or too long.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// The account still has transactions and the deletion policy forbids
    /// removing them.
    #[error("Account {0} still has {1} transactions")]
    AccountHasTransactions(AccountId, u64),

    // ========== Storage Errors ==========
    /// A unique resource already exists.
    #[error("Duplicate resource: {0}")]
    DuplicateResource(String),

    /// The underlying repository failed.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl LedgerError {
    /// Creates an ownership failure for the given resource.
    #[must_use]
    pub fn unauthorized(kind: ResourceKind, id: impl fmt::Display) -> Self {
        Self::Unauthorized {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            Self::Unauthorized { .. } => "UNAUTHORIZED_ACCESS",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::BalanceOutOfRange { .. } => "BALANCE_OUT_OF_RANGE",
            Self::InvalidBalance(_) => "INVALID_BALANCE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidName(_) => "INVALID_NAME",
            Self::AccountHasTransactions(..) => "ACCOUNT_HAS_TRANSACTIONS",
            Self::DuplicateResource(_) => "DUPLICATE_RESOURCE",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized - no identity
            Self::NotAuthenticated => 401,

            // 403 Forbidden - ownership
            Self::Unauthorized { .. } => 403,

            // 404 Not Found
            Self::UserNotFound(_)
            | Self::AccountNotFound(_)
            | Self::TransactionNotFound(_)
            | Self::ResourceNotFound(_) => 404,

            // 400 Bad Request - business rules
            Self::InsufficientBalance { .. }
            | Self::BalanceOutOfRange { .. }
            | Self::InvalidBalance(_)
            | Self::InvalidAmount(_)
            | Self::InvalidName(_) => 400,

            // 409 Conflict
            Self::AccountHasTransactions(..) | Self::DuplicateResource(_) => 409,

            // 500 Internal Server Error
            Self::Repository(_) => 500,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let msg = err.to_string();
        match err {
            LedgerError::NotAuthenticated => Self::Unauthorized(msg),
            LedgerError::Unauthorized { .. } => Self::Forbidden(msg),
            LedgerError::UserNotFound(_)
            | LedgerError::AccountNotFound(_)
            | LedgerError::TransactionNotFound(_)
            | LedgerError::ResourceNotFound(_) => Self::NotFound(msg),
            LedgerError::InvalidName(_) => Self::Validation(msg),
            LedgerError::InsufficientBalance { .. }
            | LedgerError::BalanceOutOfRange { .. }
            | LedgerError::InvalidBalance(_)
            | LedgerError::InvalidAmount(_) => Self::BusinessRule(msg),
            LedgerError::AccountHasTransactions(..) | LedgerError::DuplicateResource(_) => {
                Self::Conflict(msg)
            }
            LedgerError::Repository(_) => Self::Database(msg),
        }
    }
}
