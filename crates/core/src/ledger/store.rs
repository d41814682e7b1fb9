//! Storage seam for the ledgers.
//!
//! These traits are implemented by storage crates (and by the in-memory
//! store in this crate). Every ledger operation opens one session, performs
//! all of its reads and writes through it, and commits at the end. A session
//! dropped without `commit` must discard its writes.

use std::future::Future;

use finledger_shared::types::{AccountId, PageRequest, PageResponse, TransactionId, UserId};

use super::error::LedgerError;
use crate::account::Account;
use crate::transaction::Transaction;
use crate::user::User;

/// Read access to users.
pub trait UserDirectory: Send + Sync {
    /// Finds a user by ID.
    fn find_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, LedgerError>> + Send;

    /// Returns true if the user exists.
    fn user_exists(&self, id: UserId) -> impl Future<Output = Result<bool, LedgerError>> + Send;
}

/// Account persistence.
pub trait AccountRepository: Send + Sync {
    /// Finds an account by ID.
    ///
    /// Implementations backed by a database lock the account row for the
    /// rest of the session, so concurrent balance updates serialize.
    fn find_account(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, LedgerError>> + Send;

    /// Lists the accounts owned by a user, oldest first.
    fn find_accounts_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Account>, LedgerError>> + Send;

    /// Lists every account, oldest first, one page at a time.
    fn find_all_accounts(
        &self,
        page: &PageRequest,
    ) -> impl Future<Output = Result<PageResponse<Account>, LedgerError>> + Send;

    /// Returns true if the account exists.
    fn account_exists(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<bool, LedgerError>> + Send;

    /// Inserts or updates an account.
    fn save_account(
        &mut self,
        account: &Account,
    ) -> impl Future<Output = Result<Account, LedgerError>> + Send;

    /// Deletes an account, failing with `AccountNotFound` if no row was removed.
    fn delete_account(
        &mut self,
        id: AccountId,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;
}

/// Transaction persistence.
pub trait TransactionRepository: Send + Sync {
    /// Finds a transaction by ID.
    fn find_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<Option<Transaction>, LedgerError>> + Send;

    /// Lists an account's transactions, most recently created first.
    fn find_transactions_by_account(
        &self,
        account_id: AccountId,
    ) -> impl Future<Output = Result<Vec<Transaction>, LedgerError>> + Send;

    /// Counts an account's transactions.
    fn count_transactions_by_account(
        &self,
        account_id: AccountId,
    ) -> impl Future<Output = Result<u64, LedgerError>> + Send;

    /// Inserts or updates a transaction.
    fn save_transaction(
        &mut self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<Transaction, LedgerError>> + Send;

    /// Deletes a transaction, failing with `TransactionNotFound` if no row
    /// was removed.
    fn delete_transaction(
        &mut self,
        id: TransactionId,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;

    /// Deletes every transaction of an account, returning how many were removed.
    fn delete_transactions_by_account(
        &mut self,
        account_id: AccountId,
    ) -> impl Future<Output = Result<u64, LedgerError>> + Send;
}

/// One atomic unit of ledger work.
pub trait LedgerSession: UserDirectory + AccountRepository + TransactionRepository + Sized {
    /// Makes every write performed through this session visible.
    fn commit(self) -> impl Future<Output = Result<(), LedgerError>> + Send;
}

/// Opens ledger sessions.
pub trait LedgerStore: Send + Sync {
    /// Session type produced by this store.
    type Session: LedgerSession;

    /// Begins a new session.
    fn begin(&self) -> impl Future<Output = Result<Self::Session, LedgerError>> + Send;
}
