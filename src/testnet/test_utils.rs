//! Test utilities for ledger testing

use crate::core::{Ledger, Transaction};
use crate::error::Result;

/// Test configuration for ledger testing
pub struct TestConfig {
    pub difficulty: u32,
    pub mining_reward: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            difficulty: 1, // Easy difficulty for fast testing
            mining_reward: 50,
        }
    }
}

/// Create a test ledger with the default easy configuration
pub fn create_test_ledger() -> Result<Ledger> {
    create_test_ledger_with(&TestConfig::default())
}

/// Create a test ledger with a custom configuration
pub fn create_test_ledger_with(config: &TestConfig) -> Result<Ledger> {
    Ledger::new(config.difficulty, config.mining_reward)
}

/// Queue the standard two-transfer fixture (alice pays bob 100, bob pays
/// alice 50)
pub fn seed_standard_transfers(ledger: &mut Ledger) {
    ledger.add_transaction(Transaction::transfer("alice", "bob", 100));
    ledger.add_transaction(Transaction::transfer("bob", "alice", 50));
}
