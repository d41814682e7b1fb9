//! Conversions between database models and ledger types.

use chrono::{DateTime, FixedOffset, Utc};
use finledger_core::account::{Account, AccountType};
use finledger_core::transaction::{Transaction, TransactionCategory, TransactionType};
use finledger_core::user::{User, UserRole};
use finledger_shared::types::{AccountId, TransactionId, UserId};

use crate::entities::sea_orm_active_enums::{
    AccountType as DbAccountType, TransactionCategory as DbTransactionCategory,
    TransactionType as DbTransactionType, UserRole as DbUserRole,
};
use crate::entities::{accounts, transactions, users};

pub(crate) fn to_db_time(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    at.into()
}

fn from_db_time(at: DateTime<FixedOffset>) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

pub(crate) fn to_db_role(role: UserRole) -> DbUserRole {
    match role {
        UserRole::User => DbUserRole::User,
        UserRole::Admin => DbUserRole::Admin,
    }
}

fn from_db_role(role: DbUserRole) -> UserRole {
    match role {
        DbUserRole::User => UserRole::User,
        DbUserRole::Admin => UserRole::Admin,
    }
}

pub(crate) fn to_db_account_type(t: AccountType) -> DbAccountType {
    match t {
        AccountType::Checking => DbAccountType::Checking,
        AccountType::Savings => DbAccountType::Savings,
        AccountType::Joint => DbAccountType::Joint,
        AccountType::Investment => DbAccountType::Investment,
    }
}

fn from_db_account_type(t: DbAccountType) -> AccountType {
    match t {
        DbAccountType::Checking => AccountType::Checking,
        DbAccountType::Savings => AccountType::Savings,
        DbAccountType::Joint => AccountType::Joint,
        DbAccountType::Investment => AccountType::Investment,
    }
}

pub(crate) fn to_db_transaction_type(t: TransactionType) -> DbTransactionType {
    match t {
        TransactionType::Expense => DbTransactionType::Expense,
        TransactionType::Income => DbTransactionType::Income,
    }
}

fn from_db_transaction_type(t: DbTransactionType) -> TransactionType {
    match t {
        DbTransactionType::Expense => TransactionType::Expense,
        DbTransactionType::Income => TransactionType::Income,
    }
}

pub(crate) fn to_db_category(c: TransactionCategory) -> DbTransactionCategory {
    match c {
        TransactionCategory::Food => DbTransactionCategory::Food,
        TransactionCategory::Housing => DbTransactionCategory::Housing,
        TransactionCategory::Transport => DbTransactionCategory::Transport,
        TransactionCategory::Health => DbTransactionCategory::Health,
        TransactionCategory::Education => DbTransactionCategory::Education,
        TransactionCategory::Leisure => DbTransactionCategory::Leisure,
        TransactionCategory::Shopping => DbTransactionCategory::Shopping,
        TransactionCategory::Bills => DbTransactionCategory::Bills,
        TransactionCategory::Salary => DbTransactionCategory::Salary,
        TransactionCategory::Investment => DbTransactionCategory::Investment,
        TransactionCategory::Other => DbTransactionCategory::Other,
    }
}

fn from_db_category(c: DbTransactionCategory) -> TransactionCategory {
    match c {
        DbTransactionCategory::Food => TransactionCategory::Food,
        DbTransactionCategory::Housing => TransactionCategory::Housing,
        DbTransactionCategory::Transport => TransactionCategory::Transport,
        DbTransactionCategory::Health => TransactionCategory::Health,
        DbTransactionCategory::Education => TransactionCategory::Education,
        DbTransactionCategory::Leisure => TransactionCategory::Leisure,
        DbTransactionCategory::Shopping => TransactionCategory::Shopping,
        DbTransactionCategory::Bills => TransactionCategory::Bills,
        DbTransactionCategory::Salary => TransactionCategory::Salary,
        DbTransactionCategory::Investment => TransactionCategory::Investment,
        DbTransactionCategory::Other => TransactionCategory::Other,
    }
}

pub(crate) fn user_to_domain(model: users::Model) -> User {
    User {
        id: UserId::from_uuid(model.id),
        username: model.username,
        role: from_db_role(model.role),
        created_at: from_db_time(model.created_at),
    }
}

pub(crate) fn account_to_domain(model: accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        owner_id: UserId::from_uuid(model.user_id),
        name: model.name,
        account_type: from_db_account_type(model.account_type),
        balance: model.balance,
        created_at: from_db_time(model.created_at),
    }
}

pub(crate) fn transaction_to_domain(model: transactions::Model) -> Transaction {
    Transaction {
        id: TransactionId::from_uuid(model.id),
        account_id: AccountId::from_uuid(model.account_id),
        category: from_db_category(model.category),
        name: model.name,
        transaction_type: from_db_transaction_type(model.transaction_type),
        amount: model.amount,
        created_at: from_db_time(model.created_at),
        updated_at: from_db_time(model.updated_at),
    }
}
