//! Users as seen by the ledger.
//!
//! Registration, credentials, and token handling live outside the ledger;
//! the ledger only needs to know that a user exists and what role it has.

use chrono::{DateTime, Utc};
use finledger_shared::types::UserId;

labeled_enum! {
    /// Role of a user.
    UserRole {
        /// Regular account holder.
        User => "USER",
        /// Administrator with access to every account.
        Admin => "ADMIN",
    }
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Role of the user.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
