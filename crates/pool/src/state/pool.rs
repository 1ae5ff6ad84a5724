//! Pool state - live reserves and share supply

use amm_model::{checked_add, checked_sub, invariant};

use super::PoolConfig;
use crate::PoolError;

/// Reserves and share supply
///
/// Invariant: both reserves are zero iff `total_shares` is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolState {
    pub reserve_x: u64,
    pub reserve_y: u64,
    pub total_shares: u64,
}

impl PoolState {
    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }

    /// Constant product x·y
    pub fn invariant(&self) -> u128 {
        invariant(self.reserve_x, self.reserve_y)
    }

    /// Verify the empty-iff-no-shares invariant
    pub fn check(&self) -> Result<(), PoolError> {
        let reserves_empty = self.reserve_x == 0 && self.reserve_y == 0;
        let reserves_funded = self.reserve_x > 0 && self.reserve_y > 0;
        let consistent = if self.total_shares == 0 {
            reserves_empty
        } else {
            reserves_funded
        };
        if consistent {
            Ok(())
        } else {
            Err(PoolError::CorruptState)
        }
    }

    /// State after adding liquidity
    pub fn with_deposit(&self, x: u64, y: u64, shares: u64) -> Result<Self, PoolError> {
        Ok(Self {
            reserve_x: checked_add(self.reserve_x, x)?,
            reserve_y: checked_add(self.reserve_y, y)?,
            total_shares: checked_add(self.total_shares, shares)?,
        })
    }

    /// State after removing liquidity
    pub fn with_withdrawal(&self, x: u64, y: u64, shares: u64) -> Result<Self, PoolError> {
        Ok(Self {
            reserve_x: checked_sub(self.reserve_x, x)?,
            reserve_y: checked_sub(self.reserve_y, y)?,
            total_shares: checked_sub(self.total_shares, shares)?,
        })
    }
}

/// A pool: immutable identity plus live accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    pub config: PoolConfig,
    pub state: PoolState,
}

impl Pool {
    /// Fresh, empty, unlocked pool
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            state: PoolState::default(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        assert_eq!(PoolState::default().check(), Ok(()));

        let funded = PoolState { reserve_x: 1, reserve_y: 1, total_shares: 1 };
        assert_eq!(funded.check(), Ok(()));

        let orphan_reserves = PoolState { reserve_x: 5, reserve_y: 5, total_shares: 0 };
        assert_eq!(orphan_reserves.check(), Err(PoolError::CorruptState));

        let orphan_shares = PoolState { reserve_x: 0, reserve_y: 0, total_shares: 5 };
        assert_eq!(orphan_shares.check(), Err(PoolError::CorruptState));

        let one_sided = PoolState { reserve_x: 5, reserve_y: 0, total_shares: 5 };
        assert_eq!(one_sided.check(), Err(PoolError::CorruptState));
    }

    #[test]
    fn test_transitions() {
        let s = PoolState::default().with_deposit(100, 200, 50).unwrap();
        assert_eq!(s, PoolState { reserve_x: 100, reserve_y: 200, total_shares: 50 });
        assert_eq!(s.invariant(), 20_000);

        let s = s.with_withdrawal(100, 200, 50).unwrap();
        assert!(s.is_empty());

        assert_eq!(s.with_withdrawal(1, 0, 0), Err(PoolError::Overflow));
        let full = PoolState { reserve_x: u64::MAX, reserve_y: 1, total_shares: 1 };
        assert_eq!(full.with_deposit(1, 1, 1), Err(PoolError::Overflow));
    }
}
