//! Pool configuration - identity and policy

use amm_model::MAX_FEE_BPS;

use crate::{Address, PoolError};

/// Pool identity and policy
///
/// Fixed at initialization except for `locked`, which only the authority
/// may toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Discriminates pools over the same asset pair
    pub seed: u64,
    /// Fee on swap input in basis points (0..=10_000)
    pub fee_bps: u16,
    pub asset_x: Address,
    pub asset_y: Address,
    /// Liquidity share asset minted and burned by the pool
    pub share_asset: Address,
    /// Ledger account holding the pool's reserves
    pub vault: Address,
    /// Account allowed to lock and unlock the pool
    pub authority: Option<Address>,
    /// Rejects deposit, withdraw and swap while set
    pub locked: bool,
}

impl PoolConfig {
    /// Validate fee and asset distinctness
    ///
    /// # Errors
    /// * `InvalidFee` if `fee_bps > 10_000`
    /// * `IdenticalAssets` if any two of x, y and the share asset coincide
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.fee_bps > MAX_FEE_BPS {
            return Err(PoolError::InvalidFee);
        }
        if self.asset_x == self.asset_y
            || self.share_asset == self.asset_x
            || self.share_asset == self.asset_y
        {
            return Err(PoolError::IdenticalAssets);
        }
        Ok(())
    }

    /// Whether `caller` may toggle the lock
    pub fn is_authority(&self, caller: &Address) -> bool {
        self.authority.as_ref() == Some(caller)
    }
}
