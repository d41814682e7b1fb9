//! Balance delta rules.
//!
//! - EXPENSE of amount `a`: balance -= a, only if balance >= a
//! - INCOME of amount `a`: balance += a, no upper check beyond storage range
//!
//! Reverting an effect is the exact inverse and skips the sufficiency check.
//! Every result must stay within the stored money range.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::validation::max_money;
use crate::transaction::TransactionType;

/// Returns the signed change a transaction makes to its account balance.
#[must_use]
pub fn signed_effect(kind: TransactionType, amount: Decimal) -> Decimal {
    match kind {
        TransactionType::Expense => -amount,
        TransactionType::Income => amount,
    }
}

/// Applies a transaction's effect to `balance`.
///
/// # Errors
///
/// Returns `InsufficientBalance` if an expense exceeds the balance and
/// `BalanceOutOfRange` if the result cannot be stored. The balance is not
/// modified in either case.
pub fn apply(balance: Decimal, kind: TransactionType, amount: Decimal) -> Result<Decimal, LedgerError> {
    if kind == TransactionType::Expense && balance < amount {
        return Err(LedgerError::InsufficientBalance {
            balance,
            required: amount,
        });
    }
    shift(balance, signed_effect(kind, amount))
}

/// Removes a transaction's effect from `balance`.
///
/// # Errors
///
/// Returns `BalanceOutOfRange` if the result cannot be stored.
pub fn revert(balance: Decimal, kind: TransactionType, amount: Decimal) -> Result<Decimal, LedgerError> {
    shift(balance, -signed_effect(kind, amount))
}

/// Replays a set of transactions over an opening balance.
///
/// Used to reconcile a stored balance against its transaction history.
///
/// # Errors
///
/// Returns `BalanceOutOfRange` if an intermediate result cannot be stored.
pub fn replay<I>(opening: Decimal, effects: I) -> Result<Decimal, LedgerError>
where
    I: IntoIterator<Item = (TransactionType, Decimal)>,
{
    effects
        .into_iter()
        .try_fold(opening, |balance, (kind, amount)| shift(balance, signed_effect(kind, amount)))
}

fn shift(balance: Decimal, delta: Decimal) -> Result<Decimal, LedgerError> {
    balance
        .checked_add(delta)
        .filter(|next| next.abs() <= max_money())
        .ok_or(LedgerError::BalanceOutOfRange { balance, delta })
}
