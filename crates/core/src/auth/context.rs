//! Resolved caller identity.

use finledger_shared::types::UserId;

use crate::ledger::LedgerError;

/// The identity of the caller of a ledger operation, as resolved by an
/// outer authentication layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    user_id: Option<UserId>,
}

impl AuthContext {
    /// Context for an authenticated caller.
    #[must_use]
    pub const fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Context for a request that carried no valid credentials.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Returns the caller's user id.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` for an anonymous context.
    pub fn current_user_id(&self) -> Result<UserId, LedgerError> {
        self.user_id.ok_or(LedgerError::NotAuthenticated)
    }
}

impl From<Option<UserId>> for AuthContext {
    fn from(user_id: Option<UserId>) -> Self {
        Self { user_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_context_yields_id() {
        let id = UserId::new();
        assert_eq!(AuthContext::authenticated(id).current_user_id().unwrap(), id);
        assert_eq!(AuthContext::from(Some(id)).current_user_id().unwrap(), id);
    }

    #[test]
    fn test_anonymous_context_is_rejected() {
        assert!(matches!(
            AuthContext::anonymous().current_user_id(),
            Err(LedgerError::NotAuthenticated)
        ));
        assert!(matches!(
            AuthContext::default().current_user_id(),
            Err(LedgerError::NotAuthenticated)
        ));
    }
}
