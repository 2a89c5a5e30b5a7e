//! # TallyChain - My Proof-of-Work Ledger Playground
//!
//! This is the small blockchain I built to really understand hash-linked
//! ledgers. When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Two chain variants**: a plain hash-linked log of opaque records
//!   (`DataChain`) and a mined transactional ledger (`Ledger`)
//! - **Two-phase blocks**: mutable `BlockDraft`s seal into immutable
//!   `Block`s, so a stored hash can never drift from its content
//! - **Proof-of-work**: a big-integer target equivalent to the
//!   leading-zero-hex rule, with cooperative cancellation for long runs
//! - **Replay balances**: account balances are derived by replaying the
//!   whole chain, never stored anywhere
//! - **Lending pool**: a liquidity counter that treats a short borrow as
//!   an ordinary outcome, not a crash
//!
//! ## How I Organized My Code
//! - `core/`: blocks, transactions, mining, audits, the two chains
//! - `lending/`: the liquidity pool
//! - `config/`: demo defaults with environment overrides
//! - `utils/`: SHA-256 helpers and the clock
//! - `cli/`: command definitions for the demo binary
//!
//! ## Key Design Decisions I Made
//! - Transactions are a tagged enum, so reward mints need no magic sender
//! - The chain audit re-checks the difficulty target; that is the only
//!   check that catches a re-sealed-but-unmined tail block
//! - Chains assign index and previous-hash at append time, callers only
//!   bring payloads
//! - Everything lives in memory and every knob is a constructor argument
//!
//! ## When I Need to Understand Something
//! 1. Start with `main.rs` to see the two demo commands
//! 2. Look at `core/ledger.rs` for mining and balance derivation
//! 3. Check `core/block.rs` for the draft-then-seal life cycle
//! 4. Review `core/proof_of_work.rs` for the target math
//!
//! Remember: I built this to be educational but honest about its limits.
//! No networking, no persistence, no signatures.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod lending;
pub mod utils;

#[cfg(test)]
pub mod testnet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    Block, BlockDraft, CancelFlag, ChainFlaw, ChainValidation, DataBlock, DataChain, Ledger,
    LedgerBlock, MineControl, Payload, ProofOfWork, Transaction, DEFAULT_DIFFICULTY,
    DEFAULT_MINING_REWARD, MAX_DIFFICULTY,
};
pub use error::{ChainError, Result};
pub use lending::LendingPool;
pub use utils::{current_timestamp, sha256_digest, sha256_hex};
