//! User repository for database operations.
//!
//! Users are managed outside the ledger; this repository exists so that
//! provisioning tools and tests can create the rows the ledger looks up.

use chrono::Utc;
use finledger_core::ledger::LedgerError;
use finledger_core::user::{User, UserRole};
use finledger_shared::types::UserId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::convert::{to_db_role, to_db_time, user_to_domain};
use super::repository_error;
use crate::entities::users;

/// User repository for provisioning and lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateResource` if the username is taken.
    pub async fn create(&self, username: &str, role: UserRole) -> Result<User, LedgerError> {
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            username: Set(username.to_string()),
            role: Set(to_db_role(role)),
            created_at: Set(to_db_time(Utc::now())),
        };

        let model = user.insert(&self.db).await.map_err(repository_error)?;
        Ok(user_to_domain(model))
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, LedgerError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(repository_error)?;
        Ok(model.map(user_to_domain))
    }
}
