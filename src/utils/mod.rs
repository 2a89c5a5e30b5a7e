//! Utility functions and helpers
//!
//! This module contains the cryptographic utilities and clock helpers
//! used throughout the ledger.

pub mod crypto;

pub use crypto::{current_timestamp, sha256_digest, sha256_hex};
