//! Account entity, inputs, and projection.

use chrono::{DateTime, Utc};
use finledger_shared::types::{AccountId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{LedgerError, balance, validation};
use crate::transaction::TransactionType;

labeled_enum! {
    /// Kind of account.
    AccountType {
        /// Everyday checking account.
        Checking => "CHECKING",
        /// Savings account.
        Savings => "SAVINGS",
        /// Account shared between several people.
        Joint => "JOINT",
        /// Brokerage or investment account.
        Investment => "INVESTMENT",
    }
}

/// An account owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,
    /// Owning user. Never changes after creation.
    pub owner_id: UserId,
    /// Trimmed, non-blank display name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Current balance.
    pub balance: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Opens a new account with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` or `InvalidBalance` for invalid input.
    pub fn open(
        owner_id: UserId,
        input: CreateAccountInput,
        now: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let name = validation::account_name(&input.name)?;
        let balance = validation::non_negative_balance(input.balance)?;

        Ok(Self {
            id: AccountId::new(),
            owner_id,
            name,
            account_type: input.account_type,
            balance,
            created_at: now,
        })
    }

    /// Applies a transaction's effect to the balance.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance` for an expense larger than the balance
    /// and `BalanceOutOfRange` if the result cannot be stored, leaving the
    /// balance untouched.
    pub fn apply(&mut self, kind: TransactionType, amount: Decimal) -> Result<(), LedgerError> {
        self.balance = balance::apply(self.balance, kind, amount)?;
        Ok(())
    }

    /// Removes a transaction's effect from the balance.
    ///
    /// # Errors
    ///
    /// Returns `BalanceOutOfRange` if the result cannot be stored.
    pub fn revert(&mut self, kind: TransactionType, amount: Decimal) -> Result<(), LedgerError> {
        self.balance = balance::revert(self.balance, kind, amount)?;
        Ok(())
    }
}

/// Input for creating an account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountInput {
    /// Account name, trimmed before storage.
    pub name: String,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Opening balance, must not be negative.
    pub balance: Decimal,
}

/// Partial update of an account. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountInput {
    /// New name.
    pub name: Option<String>,
    /// New type.
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    /// New balance, must not be negative.
    pub balance: Option<Decimal>,
}

impl UpdateAccountInput {
    /// Validates every supplied field, then overwrites them on `account`.
    ///
    /// Nothing is changed if any field is invalid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` or `InvalidBalance`.
    pub fn apply_to(&self, account: &mut Account) -> Result<(), LedgerError> {
        let name = self.name.as_deref().map(validation::account_name).transpose()?;
        let balance = self.balance.map(validation::non_negative_balance).transpose()?;

        if let Some(name) = name {
            account.name = name;
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
        if let Some(balance) = balance {
            account.balance = balance;
        }
        Ok(())
    }
}

/// Read-only view of an account returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    /// The account ID.
    pub id: AccountId,
    /// Owning user.
    pub owner_id: UserId,
    /// Account name.
    pub name: String,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Current balance.
    pub balance: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            owner_id: account.owner_id,
            name: account.name.clone(),
            account_type: account.account_type,
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            owner_id: account.owner_id,
            name: account.name,
            account_type: account.account_type,
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn input(name: &str, balance: Decimal) -> CreateAccountInput {
        CreateAccountInput {
            name: name.to_string(),
            account_type: AccountType::Checking,
            balance,
        }
    }

    #[test]
    fn test_open_trims_name() {
        let owner = UserId::new();
        let account = Account::open(owner, input("  Wallet ", dec!(10.00)), Utc::now()).unwrap();
        assert_eq!(account.name, "Wallet");
        assert_eq!(account.owner_id, owner);
        assert_eq!(account.balance, dec!(10.00));
    }

    #[test]
    fn test_open_rejects_negative_balance() {
        let result = Account::open(UserId::new(), input("Wallet", dec!(-0.01)), Utc::now());
        assert!(matches!(result, Err(LedgerError::InvalidBalance(_))));
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut account = Account::open(UserId::new(), input("Wallet", dec!(5)), Utc::now()).unwrap();
        let patch = UpdateAccountInput {
            name: Some("Renamed".into()),
            account_type: Some(AccountType::Savings),
            balance: Some(dec!(-1)),
        };

        assert!(patch.apply_to(&mut account).is_err());
        assert_eq!(account.name, "Wallet");
        assert_eq!(account.account_type, AccountType::Checking);
        assert_eq!(account.balance, dec!(5));
    }

    #[test]
    fn test_update_leaves_omitted_fields() {
        let mut account = Account::open(UserId::new(), input("Wallet", dec!(5)), Utc::now()).unwrap();
        let patch = UpdateAccountInput {
            account_type: Some(AccountType::Joint),
            ..Default::default()
        };

        patch.apply_to(&mut account).unwrap();
        assert_eq!(account.name, "Wallet");
        assert_eq!(account.account_type, AccountType::Joint);
        assert_eq!(account.balance, dec!(5));
    }

    #[test]
    fn test_account_type_labels() {
        assert_eq!(AccountType::from_str("savings").unwrap(), AccountType::Savings);
        assert_eq!(AccountType::Joint.to_string(), "JOINT");
        assert_eq!(AccountType::ALL.len(), 4);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let account = Account::open(UserId::new(), input("Wallet", dec!(12.50)), Utc::now()).unwrap();
        let json = serde_json::to_value(AccountView::from(&account)).unwrap();
        assert_eq!(json["type"], "CHECKING");
        assert_eq!(json["balance"], "12.50");
        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
