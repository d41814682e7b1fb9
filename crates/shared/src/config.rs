//! Application configuration management.
//!
//! Sources are layered in order: `config/default`, `config/{RUN_MODE}`, then
//! `FINLEDGER__*` environment variables (e.g. `FINLEDGER__DATABASE__URL`).

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Ledger behavior configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// What happens to an account's transactions when the account is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountDeletePolicy {
    /// Refuse to delete an account that still has transactions.
    #[default]
    Restrict,
    /// Delete the account's transactions together with the account.
    Cascade,
}

/// Ledger behavior configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// Account deletion policy.
    #[serde(default)]
    pub account_delete_policy: AccountDeletePolicy,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "finledger=debug,sea_orm=warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FINLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
