//! Administration ledger service.

use std::sync::Arc;

use finledger_shared::AccountDeletePolicy;
use finledger_shared::types::{AccountId, PageRequest, PageResponse, UserId};
use tracing::{info, warn};

use crate::account::service::remove_account;
use crate::account::{AccountView, UpdateAccountInput};
use crate::ledger::{
    AccountRepository, LedgerError, LedgerSession, LedgerStore, ResourceKind, UserDirectory,
};

/// Administration ledger service.
///
/// Operations skip the per-account ownership check but require the caller
/// to hold the administrator role.
pub struct AdminLedger<S: LedgerStore> {
    store: Arc<S>,
    delete_policy: AccountDeletePolicy,
}

impl<S: LedgerStore> AdminLedger<S> {
    /// Creates a new administration ledger.
    #[must_use]
    pub fn new(store: Arc<S>, delete_policy: AccountDeletePolicy) -> Self {
        Self {
            store,
            delete_policy,
        }
    }

    /// Lists every account in the system.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` or `Unauthorized` for a non-administrator and
    /// `ResourceNotFound` when there are no accounts at all.
    pub async fn list_accounts(
        &self,
        admin_id: UserId,
        page: &PageRequest,
    ) -> Result<PageResponse<AccountView>, LedgerError> {
        let session = self.store.begin().await?;
        ensure_admin(&session, admin_id).await?;
        let accounts = session.find_all_accounts(page).await?;
        session.commit().await?;

        if accounts.meta.total == 0 {
            return Err(LedgerError::ResourceNotFound("no accounts found".into()));
        }
        Ok(accounts.map(AccountView::from))
    }

    /// Overwrites the supplied fields of any account.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound`/`Unauthorized` for a non-administrator,
    /// `AccountNotFound`, `InvalidName`, or `InvalidBalance`.
    pub async fn patch_account(
        &self,
        admin_id: UserId,
        id: AccountId,
        input: UpdateAccountInput,
    ) -> Result<AccountView, LedgerError> {
        let mut session = self.store.begin().await?;
        ensure_admin(&session, admin_id).await?;
        let mut account = session
            .find_account(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))?;
        input.apply_to(&mut account)?;
        let saved = session.save_account(&account).await?;
        session.commit().await?;

        info!(
            account_id = %id,
            admin_id = %admin_id,
            balance = %saved.balance,
            "Account patched by administrator"
        );
        Ok(saved.into())
    }

    /// Deletes any account according to the configured deletion policy.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound`/`Unauthorized` for a non-administrator,
    /// `AccountNotFound`, or `AccountHasTransactions` under the restrict
    /// policy.
    pub async fn delete_account(&self, admin_id: UserId, id: AccountId) -> Result<(), LedgerError> {
        let mut session = self.store.begin().await?;
        ensure_admin(&session, admin_id).await?;
        if !session.account_exists(id).await? {
            return Err(LedgerError::AccountNotFound(id));
        }
        let removed = remove_account(&mut session, id, self.delete_policy).await?;
        session.commit().await?;

        info!(
            account_id = %id,
            admin_id = %admin_id,
            removed_transactions = removed,
            "Account deleted by administrator"
        );
        Ok(())
    }
}

async fn ensure_admin<T: UserDirectory>(session: &T, user_id: UserId) -> Result<(), LedgerError> {
    let user = session
        .find_user(user_id)
        .await?
        .ok_or(LedgerError::UserNotFound(user_id))?;
    if user.is_admin() {
        return Ok(());
    }

    warn!(user_id = %user_id, "Administrator role required");
    Err(LedgerError::unauthorized(ResourceKind::Account, "*"))
}
