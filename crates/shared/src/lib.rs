//! Shared types, errors, and configuration for Finledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list operations
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AccountDeletePolicy, AppConfig, LogFormat};
pub use error::{AppError, AppResult};
