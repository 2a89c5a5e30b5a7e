use crate::error::{ChainError, Result};
use log::{info, warn};

/// Toy liquidity pool tracking one shared total. It knows nothing about
/// who deposited what; per-account positions are out of its remit.
pub struct LendingPool {
    total_liquidity: u64,
}

impl LendingPool {
    pub fn new() -> LendingPool {
        LendingPool { total_liquidity: 0 }
    }

    /// Add liquidity and return the new total. Saturates at `u64::MAX`
    /// instead of wrapping.
    pub fn deposit(&mut self, amount: u64) -> u64 {
        self.total_liquidity = self.total_liquidity.saturating_add(amount);
        info!("Deposited {amount}, pool now {}", self.total_liquidity);
        self.total_liquidity
    }

    /// Lend out `amount` when the pool covers it, returning the new total.
    /// A short pool reports the shortfall and keeps its balance; callers
    /// are expected to carry on.
    pub fn borrow(&mut self, amount: u64) -> Result<u64> {
        if amount > self.total_liquidity {
            warn!(
                "Borrow of {amount} rejected, only {} available",
                self.total_liquidity
            );
            return Err(ChainError::InsufficientFunds {
                required: amount,
                available: self.total_liquidity,
            });
        }
        self.total_liquidity -= amount;
        info!("Borrowed {amount}, pool now {}", self.total_liquidity);
        Ok(self.total_liquidity)
    }

    pub fn get_total_liquidity(&self) -> u64 {
        self.total_liquidity
    }
}

impl Default for LendingPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposits_accumulate() {
        let mut pool = LendingPool::new();
        assert_eq!(pool.deposit(1000), 1000);
        assert_eq!(pool.deposit(250), 1250);
        assert_eq!(pool.get_total_liquidity(), 1250);
    }

    #[test]
    fn test_borrow_within_liquidity() {
        let mut pool = LendingPool::new();
        pool.deposit(1000);
        assert_eq!(pool.borrow(500).unwrap(), 500);
        assert_eq!(pool.get_total_liquidity(), 500);
    }

    #[test]
    fn test_over_borrow_is_rejected_and_harmless() {
        let mut pool = LendingPool::new();
        pool.deposit(1000);
        pool.borrow(500).unwrap();

        let err = pool.borrow(600).unwrap_err();
        match err {
            ChainError::InsufficientFunds {
                required,
                available,
            } => {
                assert_eq!(required, 600);
                assert_eq!(available, 500);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The failed borrow left the pool untouched
        assert_eq!(pool.get_total_liquidity(), 500);
    }

    #[test]
    fn test_borrowing_continues_after_a_rejection() {
        let mut pool = LendingPool::new();
        pool.deposit(100);
        assert!(pool.borrow(101).is_err());
        assert_eq!(pool.borrow(100).unwrap(), 0);
    }

    #[test]
    fn test_empty_pool_rejects_any_borrow() {
        let mut pool = LendingPool::new();
        assert!(pool.borrow(1).is_err());
        assert_eq!(pool.get_total_liquidity(), 0);
    }
}
