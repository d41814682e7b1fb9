//! Transaction ledger: CRUD over transactions that keeps the owning
//! account's balance consistent with them.
//!
//! Every mutation runs in one session: the account write and the
//! transaction write are committed together or not at all.

use std::sync::Arc;

use chrono::Utc;
use finledger_shared::types::{AccountId, TransactionId, UserId};
use tracing::{debug, info, warn};

use super::types::{CreateTransactionInput, Transaction, TransactionView, UpdateTransactionInput};
use crate::account::Account;
use crate::account::service::load_owned;
use crate::auth::AuthorizationGuard;
use crate::ledger::{
    AccountRepository, LedgerError, LedgerSession, LedgerStore, ResourceKind,
    TransactionRepository,
};

/// Transaction ledger service.
pub struct TransactionLedger<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> TransactionLedger<S> {
    /// Creates a new transaction ledger.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records a transaction and applies its effect to the account balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`/`InvalidName` for invalid input,
    /// `AccountNotFound`, `Unauthorized`, `InsufficientBalance` for an
    /// expense the account cannot cover, or `BalanceOutOfRange` for income
    /// the balance cannot hold. Nothing is written on failure.
    pub async fn create(
        &self,
        current_user_id: UserId,
        input: CreateTransactionInput,
    ) -> Result<TransactionView, LedgerError> {
        let transaction = Transaction::record(input, Utc::now())?;

        let mut session = self.store.begin().await?;
        let mut account = load_owned(&session, transaction.account_id, current_user_id).await?;
        apply_effect(&mut account, &transaction)?;

        session.save_account(&account).await?;
        let saved = session.save_transaction(&transaction).await?;
        session.commit().await?;

        info!(
            transaction_id = %saved.id,
            account_id = %account.id,
            user_id = %current_user_id,
            transaction_type = %saved.transaction_type,
            amount = %saved.amount,
            balance = %account.balance,
            "Transaction created"
        );
        Ok(saved.into())
    }

    /// Returns one of the caller's transactions.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` or `Unauthorized`.
    pub async fn get_by_id(
        &self,
        id: TransactionId,
        current_user_id: UserId,
    ) -> Result<TransactionView, LedgerError> {
        let session = self.store.begin().await?;
        let (transaction, _) = load_owned_transaction(&session, id, current_user_id).await?;
        session.commit().await?;
        Ok(transaction.into())
    }

    /// Lists every transaction across the caller's accounts.
    ///
    /// Accounts are visited in their listing order; within an account,
    /// transactions are most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error only if storage fails.
    pub async fn list_all(
        &self,
        current_user_id: UserId,
    ) -> Result<Vec<TransactionView>, LedgerError> {
        let session = self.store.begin().await?;
        let mut views = Vec::new();
        for account in session.find_accounts_by_user(current_user_id).await? {
            let transactions = session.find_transactions_by_account(account.id).await?;
            views.extend(transactions.into_iter().map(TransactionView::from));
        }
        session.commit().await?;

        debug!(user_id = %current_user_id, count = views.len(), "Listed transactions");
        Ok(views)
    }

    /// Lists the transactions of one of the caller's accounts, most recent
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `Unauthorized`.
    pub async fn list_by_account(
        &self,
        account_id: AccountId,
        current_user_id: UserId,
    ) -> Result<Vec<TransactionView>, LedgerError> {
        let session = self.store.begin().await?;
        load_owned(&session, account_id, current_user_id).await?;
        let transactions = session.find_transactions_by_account(account_id).await?;
        session.commit().await?;

        Ok(transactions.into_iter().map(TransactionView::from).collect())
    }

    /// Updates a transaction, moving the account balance from the old
    /// effect to the new one.
    ///
    /// The current effect is reverted without any check, the supplied
    /// fields are applied, and the resulting effect is re-applied against
    /// the reverted balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`/`InvalidName`, `TransactionNotFound`,
    /// `Unauthorized`, `InsufficientBalance` if the new expense does not
    /// fit, or `BalanceOutOfRange`. Nothing is written on failure.
    pub async fn update(
        &self,
        id: TransactionId,
        current_user_id: UserId,
        input: UpdateTransactionInput,
    ) -> Result<TransactionView, LedgerError> {
        input.validate()?;

        let mut session = self.store.begin().await?;
        let (mut transaction, mut account) =
            load_owned_transaction(&session, id, current_user_id).await?;

        account.revert(transaction.transaction_type, transaction.amount)?;
        input.apply_to(&mut transaction, Utc::now())?;
        apply_effect(&mut account, &transaction)?;

        session.save_account(&account).await?;
        let saved = session.save_transaction(&transaction).await?;
        session.commit().await?;

        info!(
            transaction_id = %id,
            account_id = %account.id,
            user_id = %current_user_id,
            transaction_type = %saved.transaction_type,
            amount = %saved.amount,
            balance = %account.balance,
            "Transaction updated"
        );
        Ok(saved.into())
    }

    /// Deletes a transaction and reverts its effect on the account balance.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound`, `Unauthorized`, or `BalanceOutOfRange`
    /// if removing an expense would push the balance past the stored range.
    pub async fn delete(&self, id: TransactionId, current_user_id: UserId) -> Result<(), LedgerError> {
        let mut session = self.store.begin().await?;
        let (transaction, mut account) =
            load_owned_transaction(&session, id, current_user_id).await?;

        account.revert(transaction.transaction_type, transaction.amount)?;
        session.save_account(&account).await?;
        session.delete_transaction(id).await?;
        session.commit().await?;

        info!(
            transaction_id = %id,
            account_id = %account.id,
            user_id = %current_user_id,
            balance = %account.balance,
            "Transaction deleted"
        );
        Ok(())
    }
}

/// Applies the transaction's effect, logging a refused change.
fn apply_effect(account: &mut Account, transaction: &Transaction) -> Result<(), LedgerError> {
    account
        .apply(transaction.transaction_type, transaction.amount)
        .inspect_err(|e| {
            warn!(
                account_id = %account.id,
                balance = %account.balance,
                amount = %transaction.amount,
                error_code = e.error_code(),
                "Balance change refused"
            );
        })
}

/// Loads a transaction and its account, checking that the caller owns the
/// account.
///
/// The transaction is read again once the account is loaded, since loading
/// the account takes its row lock and a concurrent writer may have changed
/// or removed the transaction in between.
async fn load_owned_transaction<T>(
    session: &T,
    id: TransactionId,
    current_user_id: UserId,
) -> Result<(Transaction, Account), LedgerError>
where
    T: AccountRepository + TransactionRepository,
{
    let account_id = session
        .find_transaction(id)
        .await?
        .ok_or(LedgerError::TransactionNotFound(id))?
        .account_id;
    let account = session
        .find_account(account_id)
        .await?
        .ok_or(LedgerError::AccountNotFound(account_id))?;
    let transaction = session
        .find_transaction(id)
        .await?
        .filter(|t| t.account_id == account_id)
        .ok_or(LedgerError::TransactionNotFound(id))?;
    AuthorizationGuard::assert_owner(
        account.owner_id,
        current_user_id,
        ResourceKind::Transaction,
        id,
    )?;
    Ok((transaction, account))
}
