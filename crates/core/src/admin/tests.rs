//! Tests for the administration ledger.

use std::sync::Arc;

use finledger_shared::AccountDeletePolicy;
use finledger_shared::types::{AccountId, PageRequest, UserId};
use rust_decimal_macros::dec;

use super::AdminLedger;
use crate::account::{AccountLedger, AccountType, CreateAccountInput, UpdateAccountInput};
use crate::ledger::{LedgerError, MemoryLedgerStore};
use crate::transaction::{
    CreateTransactionInput, TransactionCategory, TransactionLedger, TransactionType,
};
use crate::user::UserRole;

struct Fixture {
    store: Arc<MemoryLedgerStore>,
    admin: UserId,
    alice: UserId,
}

async fn fixture() -> Fixture {
    let store = Arc::new(MemoryLedgerStore::new());
    let admin = store.register_user("root", UserRole::Admin).await.unwrap().id;
    let alice = store.register_user("alice", UserRole::User).await.unwrap().id;
    Fixture { store, admin, alice }
}

fn admin_ledger(fx: &Fixture, policy: AccountDeletePolicy) -> AdminLedger<MemoryLedgerStore> {
    AdminLedger::new(Arc::clone(&fx.store), policy)
}

async fn open(fx: &Fixture, name: &str) -> AccountId {
    AccountLedger::new(Arc::clone(&fx.store), AccountDeletePolicy::Restrict)
        .create(
            fx.alice,
            CreateAccountInput {
                name: name.into(),
                account_type: AccountType::Investment,
                balance: dec!(500.00),
            },
        )
        .await
        .unwrap()
        .id
}

fn first_page(per_page: u32) -> PageRequest {
    PageRequest { page: 1, per_page }
}

#[tokio::test]
async fn test_list_requires_admin_role() {
    let fx = fixture().await;
    open(&fx, "Brokerage").await;
    let admin = admin_ledger(&fx, AccountDeletePolicy::Restrict);

    let err = admin.list_accounts(fx.alice, &first_page(10)).await.unwrap_err();
    assert!(matches!(err, LedgerError::Unauthorized { .. }));

    let ghost = UserId::new();
    let err = admin.list_accounts(ghost, &first_page(10)).await.unwrap_err();
    assert!(matches!(err, LedgerError::UserNotFound(id) if id == ghost));
}

#[tokio::test]
async fn test_list_with_no_accounts_is_not_found() {
    let fx = fixture().await;

    let err = admin_ledger(&fx, AccountDeletePolicy::Restrict)
        .list_accounts(fx.admin, &first_page(10))
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::ResourceNotFound(_)));
}

#[tokio::test]
async fn test_list_pages_through_every_account() {
    let fx = fixture().await;
    let mut ids = Vec::new();
    for name in ["A", "B", "C"] {
        ids.push(open(&fx, name).await);
    }
    let admin = admin_ledger(&fx, AccountDeletePolicy::Restrict);

    let first = admin.list_accounts(fx.admin, &first_page(2)).await.unwrap();
    let second = admin
        .list_accounts(fx.admin, &PageRequest { page: 2, per_page: 2 })
        .await
        .unwrap();

    assert_eq!(first.meta.total, 3);
    assert_eq!(first.meta.total_pages, 2);
    let seen: Vec<_> = first.data.iter().chain(&second.data).map(|a| a.id).collect();
    assert_eq!(seen, ids);
}

#[tokio::test]
async fn test_patch_skips_ownership_check() {
    let fx = fixture().await;
    let id = open(&fx, "Brokerage").await;

    let patched = admin_ledger(&fx, AccountDeletePolicy::Restrict)
        .patch_account(
            fx.admin,
            id,
            UpdateAccountInput {
                balance: Some(dec!(0.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(patched.balance, dec!(0.00));
    assert_eq!(patched.owner_id, fx.alice);
    assert_eq!(patched.name, "Brokerage");
}

#[tokio::test]
async fn test_patch_by_regular_user_is_denied() {
    let fx = fixture().await;
    let id = open(&fx, "Brokerage").await;

    let err = admin_ledger(&fx, AccountDeletePolicy::Restrict)
        .patch_account(fx.alice, id, UpdateAccountInput::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_delete_missing_account() {
    let fx = fixture().await;
    let id = AccountId::new();

    let err = admin_ledger(&fx, AccountDeletePolicy::Cascade)
        .delete_account(fx.admin, id)
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::AccountNotFound(missing) if missing == id));
}

#[tokio::test]
async fn test_delete_honours_policy() {
    let fx = fixture().await;
    let id = open(&fx, "Brokerage").await;
    TransactionLedger::new(Arc::clone(&fx.store))
        .create(
            fx.alice,
            CreateTransactionInput {
                account_id: id,
                category: TransactionCategory::Investment,
                name: "Dividend".into(),
                transaction_type: TransactionType::Income,
                amount: dec!(12.34),
            },
        )
        .await
        .unwrap();

    let err = admin_ledger(&fx, AccountDeletePolicy::Restrict)
        .delete_account(fx.admin, id)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::AccountHasTransactions(_, 1)));

    admin_ledger(&fx, AccountDeletePolicy::Cascade)
        .delete_account(fx.admin, id)
        .await
        .unwrap();
    assert!(fx.store.account(id).await.is_none());
    assert_eq!(fx.store.transaction_count().await, 0);
}
