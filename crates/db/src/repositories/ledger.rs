//! PostgreSQL ledger store.
//!
//! Each session wraps one database transaction. Account loads take a row
//! lock (`SELECT ... FOR UPDATE`), so concurrent sessions that touch the same
//! account's balance serialize on that row until commit or rollback.
//! Transaction reads are plain; callers re-read a transaction after locking
//! its account to see the latest committed row.

use finledger_core::account::Account;
use finledger_core::ledger::{
    AccountRepository, LedgerError, LedgerSession, LedgerStore, TransactionRepository,
    UserDirectory,
};
use finledger_core::transaction::Transaction;
use finledger_core::user::User;
use finledger_shared::types::{AccountId, PageRequest, PageResponse, TransactionId, UserId};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use super::convert::{
    account_to_domain, to_db_account_type, to_db_category, to_db_time, to_db_transaction_type,
    transaction_to_domain, user_to_domain,
};
use super::repository_error;
use crate::entities::{accounts, transactions, users};

/// Ledger store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    db: DatabaseConnection,
}

impl PgLedgerStore {
    /// Creates a new store over a connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl LedgerStore for PgLedgerStore {
    type Session = PgLedgerSession;

    async fn begin(&self) -> Result<PgLedgerSession, LedgerError> {
        let txn = self.db.begin().await.map_err(repository_error)?;
        Ok(PgLedgerSession { txn })
    }
}

/// A session over a [`PgLedgerStore`]. Dropping it rolls back.
pub struct PgLedgerSession {
    txn: DatabaseTransaction,
}

impl UserDirectory for PgLedgerSession {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, LedgerError> {
        let model = users::Entity::find_by_id(id.into_inner())
            .one(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(model.map(user_to_domain))
    }

    async fn user_exists(&self, id: UserId) -> Result<bool, LedgerError> {
        let count = users::Entity::find_by_id(id.into_inner())
            .count(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(count > 0)
    }
}

impl AccountRepository for PgLedgerSession {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(model.map(account_to_domain))
    }

    async fn find_accounts_by_user(&self, user_id: UserId) -> Result<Vec<Account>, LedgerError> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(accounts::Column::CreatedAt)
            .order_by_asc(accounts::Column::Id)
            .all(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(models.into_iter().map(account_to_domain).collect())
    }

    async fn find_all_accounts(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<Account>, LedgerError> {
        let total = accounts::Entity::find()
            .count(&self.txn)
            .await
            .map_err(repository_error)?;

        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::CreatedAt)
            .order_by_asc(accounts::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.txn)
            .await
            .map_err(repository_error)?;

        let data = models.into_iter().map(account_to_domain).collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    async fn account_exists(&self, id: AccountId) -> Result<bool, LedgerError> {
        let count = accounts::Entity::find_by_id(id.into_inner())
            .count(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(count > 0)
    }

    async fn save_account(&mut self, account: &Account) -> Result<Account, LedgerError> {
        let model = accounts::ActiveModel {
            id: Set(account.id.into_inner()),
            user_id: Set(account.owner_id.into_inner()),
            name: Set(account.name.clone()),
            account_type: Set(to_db_account_type(account.account_type)),
            balance: Set(account.balance),
            created_at: Set(to_db_time(account.created_at)),
        };

        let saved = accounts::Entity::insert(model)
            .on_conflict(
                OnConflict::column(accounts::Column::Id)
                    .update_columns([
                        accounts::Column::Name,
                        accounts::Column::AccountType,
                        accounts::Column::Balance,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.txn)
            .await
            .map_err(repository_error)?;

        debug!(account_id = %account.id, "Account row written");
        Ok(account_to_domain(saved))
    }

    async fn delete_account(&mut self, id: AccountId) -> Result<(), LedgerError> {
        let result = accounts::Entity::delete_by_id(id.into_inner())
            .exec(&self.txn)
            .await
            .map_err(repository_error)?;
        if result.rows_affected == 0 {
            return Err(LedgerError::AccountNotFound(id));
        }
        Ok(())
    }
}

impl TransactionRepository for PgLedgerSession {
    async fn find_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let model = transactions::Entity::find_by_id(id.into_inner())
            .one(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(model.map(transaction_to_domain))
    }

    async fn find_transactions_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id.into_inner()))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(models.into_iter().map(transaction_to_domain).collect())
    }

    async fn count_transactions_by_account(&self, account_id: AccountId) -> Result<u64, LedgerError> {
        transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id.into_inner()))
            .count(&self.txn)
            .await
            .map_err(repository_error)
    }

    async fn save_transaction(&mut self, transaction: &Transaction) -> Result<Transaction, LedgerError> {
        let model = transactions::ActiveModel {
            id: Set(transaction.id.into_inner()),
            account_id: Set(transaction.account_id.into_inner()),
            category: Set(to_db_category(transaction.category)),
            name: Set(transaction.name.clone()),
            transaction_type: Set(to_db_transaction_type(transaction.transaction_type)),
            amount: Set(transaction.amount),
            created_at: Set(to_db_time(transaction.created_at)),
            updated_at: Set(to_db_time(transaction.updated_at)),
        };

        let saved = transactions::Entity::insert(model)
            .on_conflict(
                OnConflict::column(transactions::Column::Id)
                    .update_columns([
                        transactions::Column::Category,
                        transactions::Column::Name,
                        transactions::Column::TransactionType,
                        transactions::Column::Amount,
                        transactions::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.txn)
            .await
            .map_err(repository_error)?;

        debug!(transaction_id = %transaction.id, "Transaction row written");
        Ok(transaction_to_domain(saved))
    }

    async fn delete_transaction(&mut self, id: TransactionId) -> Result<(), LedgerError> {
        let result = transactions::Entity::delete_by_id(id.into_inner())
            .exec(&self.txn)
            .await
            .map_err(repository_error)?;
        if result.rows_affected == 0 {
            return Err(LedgerError::TransactionNotFound(id));
        }
        Ok(())
    }

    async fn delete_transactions_by_account(
        &mut self,
        account_id: AccountId,
    ) -> Result<u64, LedgerError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::AccountId.eq(account_id.into_inner()))
            .exec(&self.txn)
            .await
            .map_err(repository_error)?;
        Ok(result.rows_affected)
    }
}

impl LedgerSession for PgLedgerSession {
    async fn commit(self) -> Result<(), LedgerError> {
        self.txn.commit().await.map_err(repository_error)
    }
}
