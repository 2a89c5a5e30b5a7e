//! Error handling for the ledger
//!
//! This module provides the error types shared by every tallychain operation.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Error types for ledger operations
#[derive(Debug, Clone)]
pub enum ChainError {
    /// Configuration errors (unusable difficulty or parameters)
    Config(String),
    /// Cryptographic operation errors (system clock, digest)
    Crypto(String),
    /// Canonical serialization errors
    Serialization(String),
    /// A structural guarantee did not hold; callers cannot recover
    InvariantViolation(String),
    /// Insufficient liquidity for a borrow; callers are expected to recover
    InsufficientFunds { required: u64, available: u64 },
    /// Block construction errors
    InvalidBlock(String),
    /// Mining errors (interrupted search, exhausted proof space)
    Mining(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ChainError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            ChainError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            ChainError::InvariantViolation(msg) => write!(f, "Invariant violation: {msg}"),
            ChainError::InsufficientFunds {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient funds: required {required}, available {available}"
                )
            }
            ChainError::InvalidBlock(msg) => write!(f, "Invalid block: {msg}"),
            ChainError::Mining(msg) => write!(f, "Mining error: {msg}"),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Serialization(err.to_string())
    }
}
