//! Unified error type for `SpoolBuddy`.
//!
//! The ledger itself never rejects input, so every variant here describes an
//! infrastructure failure: configuration, storage, encoding, or Discord.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The underlying database rejected a query
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A storage backend failed outside the database layer
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable description of the problem
        message: String,
    },

    /// Stored records could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or invalid
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<serenity::Error>),
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
