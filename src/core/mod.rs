//! Core ledger functionality
//!
//! This module contains the chain building blocks: payloads and sealed
//! blocks, transactions, proof-of-work mining, chain audits, and the two
//! chain variants.

pub mod block;
pub mod data_chain;
pub mod ledger;
pub mod proof_of_work;
pub mod transaction;
pub mod validation;

pub use block::{Block, BlockDraft, Payload};
pub use data_chain::{DataBlock, DataChain};
pub use ledger::{Ledger, LedgerBlock, DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD};
pub use proof_of_work::{CancelFlag, MineControl, ProofOfWork, MAX_DIFFICULTY};
pub use transaction::Transaction;
pub use validation::{ChainFlaw, ChainValidation};
