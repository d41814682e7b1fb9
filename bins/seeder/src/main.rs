//! Demo data seeder for Finledger.
//!
//! Applies pending migrations, then creates a demo user with a checking and
//! a savings account and a handful of transactions. Everything goes through
//! the ledgers, so the seeded balances obey the same rules as live data.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use finledger_core::account::{AccountLedger, AccountType, CreateAccountInput};
use finledger_core::transaction::{
    CreateTransactionInput, TransactionCategory, TransactionLedger, TransactionType,
};
use finledger_core::user::UserRole;
use finledger_db::migration::{Migrator, MigratorTrait};
use finledger_db::{PgLedgerStore, UserRepository};
use finledger_shared::config::LogConfig;
use finledger_shared::{AppConfig, LogFormat};
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_USERNAME: &str = "demo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log);

    let db = finledger_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    let users = UserRepository::new(db.clone());
    if users.find_by_username(DEMO_USERNAME).await?.is_some() {
        info!(username = DEMO_USERNAME, "Demo user already present, nothing to seed");
        return Ok(());
    }
    let demo = users.create(DEMO_USERNAME, UserRole::User).await?;
    users.create("admin", UserRole::Admin).await?;

    let store = Arc::new(PgLedgerStore::new(db));
    let accounts = AccountLedger::new(Arc::clone(&store), config.ledger.account_delete_policy);
    let transactions = TransactionLedger::new(store);

    let checking = accounts
        .create(
            demo.id,
            CreateAccountInput {
                name: "Everyday".into(),
                account_type: AccountType::Checking,
                balance: dec!(250.00),
            },
        )
        .await?;
    let savings = accounts
        .create(
            demo.id,
            CreateAccountInput {
                name: "Rainy day".into(),
                account_type: AccountType::Savings,
                balance: dec!(1000.00),
            },
        )
        .await?;

    let entries = [
        (checking.id, TransactionCategory::Salary, "Monthly salary", TransactionType::Income, dec!(2400.00)),
        (checking.id, TransactionCategory::Housing, "Rent", TransactionType::Expense, dec!(950.00)),
        (checking.id, TransactionCategory::Food, "Groceries", TransactionType::Expense, dec!(84.37)),
        (checking.id, TransactionCategory::Transport, "Bus pass", TransactionType::Expense, dec!(45.00)),
        (savings.id, TransactionCategory::Investment, "Interest", TransactionType::Income, dec!(3.12)),
    ];
    for (account_id, category, name, transaction_type, amount) in entries {
        transactions
            .create(
                demo.id,
                CreateTransactionInput {
                    account_id,
                    category,
                    name: name.into(),
                    transaction_type,
                    amount,
                },
            )
            .await?;
    }

    for account in accounts.list(demo.id).await? {
        info!(
            account_id = %account.id,
            name = %account.name,
            balance = %account.balance,
            "Seeded account"
        );
    }
    info!("Seeding complete");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}
