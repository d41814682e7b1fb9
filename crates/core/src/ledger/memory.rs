//! In-memory ledger store.
//!
//! A session holds the store's lock for its whole lifetime and works on a
//! staged copy of the state. `commit` publishes the copy; dropping the
//! session throws it away. Sessions are therefore fully serialized.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use finledger_shared::types::{AccountId, PageRequest, PageResponse, TransactionId, UserId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::error::LedgerError;
use super::store::{
    AccountRepository, LedgerSession, LedgerStore, TransactionRepository, UserDirectory,
};
use crate::account::Account;
use crate::transaction::Transaction;
use crate::user::{User, UserRole};

#[derive(Debug, Clone)]
struct StoredTransaction {
    seq: u64,
    transaction: Transaction,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    accounts: HashMap<AccountId, Account>,
    transactions: HashMap<TransactionId, StoredTransaction>,
    next_seq: u64,
}

impl MemoryState {
    fn accounts_sorted(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|a| (a.created_at, a.id));
        accounts
    }
}

/// Ledger store kept entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateResource` if the username is taken.
    pub async fn register_user(
        &self,
        username: &str,
        role: UserRole,
    ) -> Result<User, LedgerError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.username == username) {
            return Err(LedgerError::DuplicateResource(format!(
                "username '{username}' already exists"
            )));
        }

        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            role,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Returns the committed state of an account.
    pub async fn account(&self, id: AccountId) -> Option<Account> {
        self.state.lock().await.accounts.get(&id).cloned()
    }

    /// Returns the committed state of a transaction.
    pub async fn transaction(&self, id: TransactionId) -> Option<Transaction> {
        self.state
            .lock()
            .await
            .transactions
            .get(&id)
            .map(|s| s.transaction.clone())
    }

    /// Returns the number of committed transactions across all accounts.
    pub async fn transaction_count(&self) -> usize {
        self.state.lock().await.transactions.len()
    }
}

impl LedgerStore for MemoryLedgerStore {
    type Session = MemorySession;

    async fn begin(&self) -> Result<MemorySession, LedgerError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(MemorySession { guard, staged })
    }
}

/// A session over a [`MemoryLedgerStore`].
#[derive(Debug)]
pub struct MemorySession {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

impl UserDirectory for MemorySession {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, LedgerError> {
        Ok(self.staged.users.get(&id).cloned())
    }

    async fn user_exists(&self, id: UserId) -> Result<bool, LedgerError> {
        Ok(self.staged.users.contains_key(&id))
    }
}

impl AccountRepository for MemorySession {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        Ok(self.staged.accounts.get(&id).cloned())
    }

    async fn find_accounts_by_user(&self, user_id: UserId) -> Result<Vec<Account>, LedgerError> {
        Ok(self
            .staged
            .accounts_sorted()
            .into_iter()
            .filter(|a| a.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all_accounts(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<Account>, LedgerError> {
        let all = self.staged.accounts_sorted();
        let total = all.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let data = all.into_iter().skip(offset).take(limit).cloned().collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    async fn account_exists(&self, id: AccountId) -> Result<bool, LedgerError> {
        Ok(self.staged.accounts.contains_key(&id))
    }

    async fn save_account(&mut self, account: &Account) -> Result<Account, LedgerError> {
        self.staged.accounts.insert(account.id, account.clone());
        Ok(account.clone())
    }

    async fn delete_account(&mut self, id: AccountId) -> Result<(), LedgerError> {
        self.staged
            .accounts
            .remove(&id)
            .map(drop)
            .ok_or(LedgerError::AccountNotFound(id))
    }
}

impl TransactionRepository for MemorySession {
    async fn find_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        Ok(self.staged.transactions.get(&id).map(|s| s.transaction.clone()))
    }

    async fn find_transactions_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let mut stored: Vec<&StoredTransaction> = self
            .staged
            .transactions
            .values()
            .filter(|s| s.transaction.account_id == account_id)
            .collect();
        stored.sort_by(|a, b| {
            b.transaction
                .created_at
                .cmp(&a.transaction.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(stored.into_iter().map(|s| s.transaction.clone()).collect())
    }

    async fn count_transactions_by_account(&self, account_id: AccountId) -> Result<u64, LedgerError> {
        Ok(self
            .staged
            .transactions
            .values()
            .filter(|s| s.transaction.account_id == account_id)
            .count() as u64)
    }

    async fn save_transaction(&mut self, transaction: &Transaction) -> Result<Transaction, LedgerError> {
        let seq = match self.staged.transactions.get(&transaction.id) {
            Some(existing) => existing.seq,
            None => {
                self.staged.next_seq += 1;
                self.staged.next_seq
            }
        };
        self.staged.transactions.insert(
            transaction.id,
            StoredTransaction {
                seq,
                transaction: transaction.clone(),
            },
        );
        Ok(transaction.clone())
    }

    async fn delete_transaction(&mut self, id: TransactionId) -> Result<(), LedgerError> {
        self.staged
            .transactions
            .remove(&id)
            .map(drop)
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    async fn delete_transactions_by_account(
        &mut self,
        account_id: AccountId,
    ) -> Result<u64, LedgerError> {
        let before = self.staged.transactions.len();
        self.staged
            .transactions
            .retain(|_, s| s.transaction.account_id != account_id);
        Ok((before - self.staged.transactions.len()) as u64)
    }
}

impl LedgerSession for MemorySession {
    async fn commit(self) -> Result<(), LedgerError> {
        let Self { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountType, CreateAccountInput};
    use rust_decimal_macros::dec;

    async fn open_account(store: &MemoryLedgerStore, owner: UserId) -> Account {
        let account = Account::open(
            owner,
            CreateAccountInput {
                name: "Wallet".into(),
                account_type: AccountType::Checking,
                balance: dec!(100),
            },
            Utc::now(),
        )
        .unwrap();
        let mut session = store.begin().await.unwrap();
        session.save_account(&account).await.unwrap();
        session.commit().await.unwrap();
        account
    }

    #[tokio::test]
    async fn test_dropped_session_discards_writes() {
        let store = MemoryLedgerStore::new();
        let user = store.register_user("alice", UserRole::User).await.unwrap();
        let account = open_account(&store, user.id).await;

        {
            let mut session = store.begin().await.unwrap();
            let mut changed = account.clone();
            changed.balance = dec!(1);
            session.save_account(&changed).await.unwrap();
        }

        assert_eq!(store.account(account.id).await.unwrap().balance, dec!(100));
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = MemoryLedgerStore::new();
        let user = store.register_user("alice", UserRole::User).await.unwrap();
        let account = open_account(&store, user.id).await;

        let mut session = store.begin().await.unwrap();
        let mut changed = account.clone();
        changed.balance = dec!(42);
        session.save_account(&changed).await.unwrap();
        session.commit().await.unwrap();

        assert_eq!(store.account(account.id).await.unwrap().balance, dec!(42));
    }

    #[tokio::test]
    async fn test_deleting_missing_rows_reports_not_found() {
        let store = MemoryLedgerStore::new();
        let user = store.register_user("alice", UserRole::User).await.unwrap();
        let account = open_account(&store, user.id).await;

        let mut session = store.begin().await.unwrap();
        session.delete_account(account.id).await.unwrap();
        let err = session.delete_account(account.id).await.unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(id) if id == account.id));

        let missing = TransactionId::new();
        let err = session.delete_transaction(missing).await.unwrap_err();
        assert!(matches!(err, LedgerError::TransactionNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryLedgerStore::new();
        store.register_user("alice", UserRole::User).await.unwrap();
        let err = store.register_user("alice", UserRole::Admin).await.unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateResource(_)));
    }

    #[tokio::test]
    async fn test_pagination_over_all_accounts() {
        let store = MemoryLedgerStore::new();
        let user = store.register_user("alice", UserRole::User).await.unwrap();
        for _ in 0..5 {
            open_account(&store, user.id).await;
        }

        let session = store.begin().await.unwrap();
        let page = session
            .find_all_accounts(&PageRequest {
                page: 2,
                per_page: 2,
            })
            .await
            .unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.total_pages, 3);
    }
}
