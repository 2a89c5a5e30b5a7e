//! Lending pool
//!
//! A peripheral consumer of ledger-style value: a single-counter
//! liquidity pool whose failed borrows are ordinary, recoverable
//! outcomes rather than faults.

pub mod pool;

pub use pool::LendingPool;
