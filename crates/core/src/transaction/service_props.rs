//! Property-based tests for TransactionLedger.
//!
//! Random sequences of creates, updates, and deletes are run against the
//! in-memory store; after every step the stored balance must equal the
//! opening balance replayed over the surviving transactions.

use std::sync::Arc;

use finledger_shared::AccountDeletePolicy;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{
    CreateTransactionInput, TransactionCategory, TransactionLedger, TransactionType,
    UpdateTransactionInput,
};
use crate::account::{AccountLedger, AccountType, CreateAccountInput};
use crate::ledger::{
    LedgerError, LedgerStore, MemoryLedgerStore, TransactionRepository, balance,
};
use crate::user::UserRole;

#[derive(Debug, Clone)]
enum Op {
    Create(TransactionType, Decimal),
    Update(usize, Option<TransactionType>, Option<Decimal>),
    Delete(usize),
}

fn arb_kind() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Expense), Just(TransactionType::Income)]
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..50_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_kind(), arb_amount()).prop_map(|(k, a)| Op::Create(k, a)),
        (any::<usize>(), proptest::option::of(arb_kind()), proptest::option::of(arb_amount()))
            .prop_map(|(i, k, a)| Op::Update(i, k, a)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The stored balance always equals the opening balance replayed over
    /// the stored transactions, and failed operations change nothing.
    #[test]
    fn prop_balance_reconciles_with_history(
        opening in (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2)),
        ops in prop::collection::vec(arb_op(), 1..25),
    ) {
        runtime().block_on(async {
            let store = Arc::new(MemoryLedgerStore::new());
            let owner = store.register_user("owner", UserRole::User).await.unwrap().id;
            let account_id = AccountLedger::new(Arc::clone(&store), AccountDeletePolicy::Restrict)
                .create(owner, CreateAccountInput {
                    name: "Main".into(),
                    account_type: AccountType::Savings,
                    balance: opening,
                })
                .await
                .unwrap()
                .id;
            let ledger = TransactionLedger::new(Arc::clone(&store));
            let mut live = Vec::new();

            for op in ops {
                let before = store.account(account_id).await.unwrap().balance;
                let result = match op {
                    Op::Create(kind, amount) => ledger
                        .create(owner, CreateTransactionInput {
                            account_id,
                            category: TransactionCategory::Other,
                            name: "Entry".into(),
                            transaction_type: kind,
                            amount,
                        })
                        .await
                        .map(|view| live.push(view.id)),
                    Op::Update(_, _, _) | Op::Delete(_) if live.is_empty() => continue,
                    Op::Update(i, kind, amount) => ledger
                        .update(live[i % live.len()], owner, UpdateTransactionInput {
                            transaction_type: kind,
                            amount,
                            ..Default::default()
                        })
                        .await
                        .map(|_| ()),
                    Op::Delete(i) => {
                        let id = live.remove(i % live.len());
                        ledger.delete(id, owner).await
                    }
                };

                let after = store.account(account_id).await.unwrap().balance;
                match result {
                    Ok(()) => {}
                    Err(LedgerError::InsufficientBalance { .. }) => prop_assert_eq!(after, before),
                    Err(other) => prop_assert!(false, "unexpected error: {other}"),
                }

                let session = store.begin().await.unwrap();
                let history = session.find_transactions_by_account(account_id).await.unwrap();
                drop(session);
                let replayed = balance::replay(
                    opening,
                    history.iter().map(|t| (t.transaction_type, t.amount)),
                )
                .unwrap();
                prop_assert_eq!(after, replayed);
                prop_assert_eq!(history.len(), live.len());
            }
            Ok(())
        })?;
    }
}
