//! Initial database migration.
//!
//! Creates the enum types and the users, accounts, and transactions tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('USER', 'ADMIN');

CREATE TYPE account_type AS ENUM ('CHECKING', 'SAVINGS', 'JOINT', 'INVESTMENT');

CREATE TYPE transaction_type AS ENUM ('EXPENSE', 'INCOME');

CREATE TYPE transaction_category AS ENUM (
    'FOOD',
    'HOUSING',
    'TRANSPORT',
    'HEALTH',
    'EDUCATION',
    'LEISURE',
    'SHOPPING',
    'BILLS',
    'SALARY',
    'INVESTMENT',
    'OTHER'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR(120) NOT NULL UNIQUE,
    role user_role NOT NULL DEFAULT 'USER',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id),
    name VARCHAR(120) NOT NULL CHECK (length(btrim(name)) > 0),
    account_type account_type NOT NULL,
    balance NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_accounts_user ON accounts(user_id, created_at);
CREATE INDEX idx_accounts_created ON accounts(created_at, id);
";

// No ON DELETE CASCADE: the deletion policy is enforced by the ledger.
const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    category transaction_category NOT NULL,
    name VARCHAR(120) NOT NULL,
    transaction_type transaction_type NOT NULL,
    amount NUMERIC(19, 4) NOT NULL CHECK (amount > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_transactions_account_created
    ON transactions(account_id, created_at DESC, id DESC);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS transaction_category CASCADE;
DROP TYPE IF EXISTS transaction_type CASCADE;
DROP TYPE IF EXISTS account_type CASCADE;
DROP TYPE IF EXISTS user_role CASCADE;
";
