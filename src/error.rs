//! Error types for veriflow.
//!
//! Step-validation failures are deliberately NOT errors — they are reported
//! as [`crate::notify::Notice`]s and never propagate as control flow.

use uuid::Uuid;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wizard session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {id} not found")]
    NotFound { id: Uuid },
}

/// Wallet connector errors.
///
/// All recoverable from the user's point of view: the wizard reports the
/// failure and the user may retry the connect any number of times.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("No wallet provider is available in this environment")]
    ProviderNotFound,

    #[error("Wallet provider returned an empty account list")]
    NoAccountsReturned,

    #[error("Wallet connection failed: {0}")]
    Connection(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
