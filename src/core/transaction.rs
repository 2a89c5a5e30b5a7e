use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A value-transfer record carried in a ledger block.
///
/// Reward issuance is its own variant instead of a transfer with a magic
/// sender, so the canonical form of a mint can never collide with a
/// transfer from an address that happens to spell the same token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transaction {
    /// Moves `amount` from `sender` to `recipient`
    Transfer {
        sender: String,
        recipient: String,
        amount: u64,
    },
    /// Creates `amount` out of nothing for `recipient` (mining reward)
    Mint { recipient: String, amount: u64 },
}

impl Transaction {
    pub fn transfer(sender: &str, recipient: &str, amount: u64) -> Transaction {
        Transaction::Transfer {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        }
    }

    pub fn mint(recipient: &str, amount: u64) -> Transaction {
        Transaction::Mint {
            recipient: recipient.to_string(),
            amount,
        }
    }

    pub fn get_sender(&self) -> Option<&str> {
        match self {
            Transaction::Transfer { sender, .. } => Some(sender.as_str()),
            Transaction::Mint { .. } => None,
        }
    }

    pub fn get_recipient(&self) -> &str {
        match self {
            Transaction::Transfer { recipient, .. } => recipient.as_str(),
            Transaction::Mint { recipient, .. } => recipient.as_str(),
        }
    }

    pub fn get_amount(&self) -> u64 {
        match self {
            Transaction::Transfer { amount, .. } => *amount,
            Transaction::Mint { amount, .. } => *amount,
        }
    }

    pub fn is_mint(&self) -> bool {
        matches!(self, Transaction::Mint { .. })
    }

    /// Canonical JSON form, used both for block digests and for reporting.
    ///
    /// Field order follows the declaration order above, so the output is
    /// byte-stable across runs.
    pub fn canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
