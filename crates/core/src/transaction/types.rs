//! Transaction entity, inputs, and projection.

use chrono::{DateTime, Utc};
use finledger_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{LedgerError, validation};

labeled_enum! {
    /// Direction of a transaction's effect on its account.
    TransactionType {
        /// Debit: lowers the balance and needs enough funds.
        Expense => "EXPENSE",
        /// Credit: raises the balance.
        Income => "INCOME",
    }
}

labeled_enum! {
    /// Spending or earning category.
    TransactionCategory {
        /// Groceries and restaurants.
        Food => "FOOD",
        /// Rent, mortgage, maintenance.
        Housing => "HOUSING",
        /// Fuel, fares, vehicles.
        Transport => "TRANSPORT",
        /// Medical costs and insurance.
        Health => "HEALTH",
        /// Tuition, courses, books.
        Education => "EDUCATION",
        /// Entertainment and travel.
        Leisure => "LEISURE",
        /// General purchases.
        Shopping => "SHOPPING",
        /// Utilities and subscriptions.
        Bills => "BILLS",
        /// Wages.
        Salary => "SALARY",
        /// Returns and contributions.
        Investment => "INVESTMENT",
        /// Anything else.
        Other => "OTHER",
    }
}

/// A signed monetary event against one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The transaction ID.
    pub id: TransactionId,
    /// Owning account. Never changes after creation.
    pub account_id: AccountId,
    /// Category.
    pub category: TransactionCategory,
    /// Free-text description.
    pub name: String,
    /// Expense or income.
    pub transaction_type: TransactionType,
    /// Strictly positive amount.
    pub amount: Decimal,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Records a new transaction against `input.account_id`.
    ///
    /// The caller is responsible for applying the balance effect.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` or `InvalidName` for invalid input.
    pub fn record(input: CreateTransactionInput, now: DateTime<Utc>) -> Result<Self, LedgerError> {
        let amount = validation::positive_amount(input.amount)?;
        let name = validation::transaction_name(&input.name)?;

        Ok(Self {
            id: TransactionId::new(),
            account_id: input.account_id,
            category: input.category,
            name,
            transaction_type: input.transaction_type,
            amount,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionInput {
    /// Account the transaction belongs to.
    pub account_id: AccountId,
    /// Category.
    pub category: TransactionCategory,
    /// Free-text description.
    pub name: String,
    /// Expense or income.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Strictly positive amount.
    pub amount: Decimal,
}

/// Partial update of a transaction. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransactionInput {
    /// New description.
    pub name: Option<String>,
    /// New category.
    pub category: Option<TransactionCategory>,
    /// New direction.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// New amount, must be strictly positive.
    pub amount: Option<Decimal>,
}

impl UpdateTransactionInput {
    /// Checks every supplied field without touching any transaction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` or `InvalidName`.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if let Some(amount) = self.amount {
            validation::positive_amount(amount)?;
        }
        if let Some(name) = &self.name {
            validation::transaction_name(name)?;
        }
        Ok(())
    }

    /// Overwrites the supplied fields on `transaction` and refreshes
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` or `InvalidName`; nothing is changed then.
    pub fn apply_to(
        &self,
        transaction: &mut Transaction,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        self.validate()?;

        if let Some(name) = &self.name {
            transaction.name = validation::transaction_name(name)?;
        }
        if let Some(category) = self.category {
            transaction.category = category;
        }
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        transaction.updated_at = now;
        Ok(())
    }
}

/// Read-only view of a transaction returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// The transaction ID.
    pub id: TransactionId,
    /// Owning account.
    pub account_id: AccountId,
    /// Category.
    pub category: TransactionCategory,
    /// Free-text description.
    pub name: String,
    /// Expense or income.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount.
    pub amount: Decimal,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last modified.
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionView {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            account_id: tx.account_id,
            category: tx.category,
            name: tx.name,
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            created_at: tx.created_at,
            updated_at: tx.updated_at,
        }
    }
}
