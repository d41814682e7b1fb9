//! Ownership enforcement.

use std::fmt::Display;

use finledger_shared::types::UserId;
use tracing::warn;

use crate::ledger::{LedgerError, ResourceKind};

/// Decides whether a caller may touch a resource.
///
/// Ownership is always the owning account's user. Transactions have no
/// owner of their own; callers load the account and pass its owner here.
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Confirms that `current_user_id` owns the resource.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the owner differs from the caller.
    pub fn assert_owner(
        resource_owner_id: UserId,
        current_user_id: UserId,
        kind: ResourceKind,
        resource_id: impl Display,
    ) -> Result<(), LedgerError> {
        if resource_owner_id == current_user_id {
            return Ok(());
        }

        warn!(
            user_id = %current_user_id,
            resource = %kind,
            resource_id = %resource_id,
            "Ownership check failed"
        );
        Err(LedgerError::unauthorized(kind, resource_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finledger_shared::types::{AccountId, TransactionId};

    #[test]
    fn test_owner_is_allowed() {
        let owner = UserId::new();
        assert!(
            AuthorizationGuard::assert_owner(owner, owner, ResourceKind::Account, AccountId::new())
                .is_ok()
        );
    }

    #[test]
    fn test_other_user_is_denied() {
        let owner = UserId::new();
        let intruder = UserId::new();
        let tx_id = TransactionId::new();

        let err = AuthorizationGuard::assert_owner(owner, intruder, ResourceKind::Transaction, tx_id)
            .unwrap_err();

        match err {
            LedgerError::Unauthorized { kind, id } => {
                assert_eq!(kind, ResourceKind::Transaction);
                assert_eq!(id, tx_id.to_string());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
