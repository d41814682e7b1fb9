//! Account ledger: CRUD over accounts with ownership enforcement.

use std::sync::Arc;

use chrono::Utc;
use finledger_shared::AccountDeletePolicy;
use finledger_shared::types::{AccountId, UserId};
use tracing::{debug, info};

use super::types::{Account, AccountView, CreateAccountInput, UpdateAccountInput};
use crate::auth::AuthorizationGuard;
use crate::ledger::{
    AccountRepository, LedgerError, LedgerSession, LedgerStore, ResourceKind, UserDirectory,
};

/// Account ledger service.
pub struct AccountLedger<S: LedgerStore> {
    store: Arc<S>,
    delete_policy: AccountDeletePolicy,
}

impl<S: LedgerStore> AccountLedger<S> {
    /// Creates a new account ledger.
    #[must_use]
    pub fn new(store: Arc<S>, delete_policy: AccountDeletePolicy) -> Self {
        Self {
            store,
            delete_policy,
        }
    }

    /// Opens an account owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` or `InvalidBalance` for invalid input and
    /// `UserNotFound` if the caller has no user record.
    pub async fn create(
        &self,
        current_user_id: UserId,
        input: CreateAccountInput,
    ) -> Result<AccountView, LedgerError> {
        let account = Account::open(current_user_id, input, Utc::now())?;

        let mut session = self.store.begin().await?;
        ensure_user(&session, current_user_id).await?;
        let saved = session.save_account(&account).await?;
        session.commit().await?;

        info!(
            account_id = %saved.id,
            user_id = %current_user_id,
            balance = %saved.balance,
            "Account created"
        );
        Ok(saved.into())
    }

    /// Lists the caller's accounts.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the caller has no user record.
    pub async fn list(&self, current_user_id: UserId) -> Result<Vec<AccountView>, LedgerError> {
        let session = self.store.begin().await?;
        ensure_user(&session, current_user_id).await?;
        let accounts = session.find_accounts_by_user(current_user_id).await?;
        session.commit().await?;

        debug!(user_id = %current_user_id, count = accounts.len(), "Listed accounts");
        Ok(accounts.into_iter().map(AccountView::from).collect())
    }

    /// Returns one of the caller's accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `Unauthorized`.
    pub async fn get_by_id(
        &self,
        id: AccountId,
        current_user_id: UserId,
    ) -> Result<AccountView, LedgerError> {
        let session = self.store.begin().await?;
        let account = load_owned(&session, id, current_user_id).await?;
        session.commit().await?;
        Ok(account.into())
    }

    /// Overwrites the supplied fields of one of the caller's accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `Unauthorized`, `InvalidName`, or
    /// `InvalidBalance`.
    pub async fn update(
        &self,
        id: AccountId,
        current_user_id: UserId,
        input: UpdateAccountInput,
    ) -> Result<AccountView, LedgerError> {
        let mut session = self.store.begin().await?;
        let mut account = load_owned(&session, id, current_user_id).await?;
        input.apply_to(&mut account)?;
        let saved = session.save_account(&account).await?;
        session.commit().await?;

        info!(
            account_id = %id,
            user_id = %current_user_id,
            balance = %saved.balance,
            "Account updated"
        );
        Ok(saved.into())
    }

    /// Deletes one of the caller's accounts according to the configured
    /// deletion policy.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `Unauthorized`, or
    /// `AccountHasTransactions` under the restrict policy.
    pub async fn delete(&self, id: AccountId, current_user_id: UserId) -> Result<(), LedgerError> {
        let mut session = self.store.begin().await?;
        load_owned(&session, id, current_user_id).await?;
        let removed = remove_account(&mut session, id, self.delete_policy).await?;
        session.commit().await?;

        info!(
            account_id = %id,
            user_id = %current_user_id,
            removed_transactions = removed,
            "Account deleted"
        );
        Ok(())
    }
}

async fn ensure_user<T: UserDirectory>(session: &T, user_id: UserId) -> Result<(), LedgerError> {
    if session.user_exists(user_id).await? {
        Ok(())
    } else {
        Err(LedgerError::UserNotFound(user_id))
    }
}

/// Loads an account and checks that the caller owns it.
pub(crate) async fn load_owned<T: AccountRepository>(
    session: &T,
    id: AccountId,
    current_user_id: UserId,
) -> Result<Account, LedgerError> {
    let account = session
        .find_account(id)
        .await?
        .ok_or(LedgerError::AccountNotFound(id))?;
    AuthorizationGuard::assert_owner(account.owner_id, current_user_id, ResourceKind::Account, id)?;
    Ok(account)
}

/// Deletes an account, handling its transactions per `policy`. Returns the
/// number of transactions removed alongside it.
pub(crate) async fn remove_account<T: LedgerSession>(
    session: &mut T,
    account_id: AccountId,
    policy: AccountDeletePolicy,
) -> Result<u64, LedgerError> {
    let removed = match policy {
        AccountDeletePolicy::Restrict => {
            let count = session.count_transactions_by_account(account_id).await?;
            if count > 0 {
                return Err(LedgerError::AccountHasTransactions(account_id, count));
            }
            0
        }
        AccountDeletePolicy::Cascade => session.delete_transactions_by_account(account_id).await?,
    };
    session.delete_account(account_id).await?;
    Ok(removed)
}
