//! Configuration management
//!
//! This module handles the demo-facing settings: default difficulty,
//! mining reward and miner address, overridable through the environment.
//!
//! The ledger core never reads these; it is parameter-driven.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
