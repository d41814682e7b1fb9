//! `SeaORM` active enums mirroring the PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    #[sea_orm(string_value = "CHECKING")]
    Checking,
    #[sea_orm(string_value = "SAVINGS")]
    Savings,
    #[sea_orm(string_value = "JOINT")]
    Joint,
    #[sea_orm(string_value = "INVESTMENT")]
    Investment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
pub enum TransactionType {
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    #[sea_orm(string_value = "INCOME")]
    Income,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_category")]
pub enum TransactionCategory {
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSING")]
    Housing,
    #[sea_orm(string_value = "TRANSPORT")]
    Transport,
    #[sea_orm(string_value = "HEALTH")]
    Health,
    #[sea_orm(string_value = "EDUCATION")]
    Education,
    #[sea_orm(string_value = "LEISURE")]
    Leisure,
    #[sea_orm(string_value = "SHOPPING")]
    Shopping,
    #[sea_orm(string_value = "BILLS")]
    Bills,
    #[sea_orm(string_value = "SALARY")]
    Salary,
    #[sea_orm(string_value = "INVESTMENT")]
    Investment,
    #[sea_orm(string_value = "OTHER")]
    Other,
}
