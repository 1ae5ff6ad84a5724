//! Pool arena keyed by seed
//!
//! The registry owns every pool. Operations look a pool up by seed, run the
//! matching instruction against it and leave every other pool untouched.

use std::collections::BTreeMap;

use amm_model::{DepositAmounts, SwapQuote, WithdrawAmounts};

use crate::instructions::{
    process_deposit, process_initialize, process_set_lock, process_swap, process_withdraw,
    SwapDirection,
};
use crate::{Address, Pool, PoolConfig, PoolError, TokenLedger};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRegistry {
    pools: BTreeMap<u64, Pool>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from persisted pools
    ///
    /// # Errors
    /// * `DuplicatePool` - two pools share a seed
    /// * `AssetConflict` - two pools share a share asset or vault
    pub fn from_pools(pools: impl IntoIterator<Item = Pool>) -> Result<Self, PoolError> {
        let mut registry = Self::new();
        for pool in pools {
            registry.insert(pool)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, pool: Pool) -> Result<(), PoolError> {
        let seed = pool.seed();
        if self.pools.contains_key(&seed) {
            return Err(PoolError::DuplicatePool(seed));
        }
        self.check_identity(&pool.config)?;
        self.pools.insert(seed, pool);
        Ok(())
    }

    /// A pool's share asset and vault belong to it alone: no other pool may
    /// use that share asset as its share or reserve asset, or share its vault.
    fn check_identity(&self, config: &PoolConfig) -> Result<(), PoolError> {
        for other in self.pools.values() {
            let o = &other.config;
            let share_clash = [o.asset_x, o.asset_y, o.share_asset].contains(&config.share_asset)
                || config.asset_x == o.share_asset
                || config.asset_y == o.share_asset;
            if share_clash || config.vault == o.vault {
                log::warn!(
                    "pool {}: share asset or vault clashes with pool {}",
                    config.seed,
                    o.seed
                );
                return Err(PoolError::AssetConflict(o.seed));
            }
        }
        Ok(())
    }

    /// Seed of the pool whose share asset is `asset`
    pub fn share_asset_owner(&self, asset: &Address) -> Option<u64> {
        self.pools()
            .find(|pool| pool.config.share_asset == *asset)
            .map(Pool::seed)
    }

    /// Seed of the pool whose vault is `account`
    pub fn vault_owner(&self, account: &Address) -> Option<u64> {
        self.pools()
            .find(|pool| pool.config.vault == *account)
            .map(Pool::seed)
    }

    pub fn pool(&self, seed: u64) -> Result<&Pool, PoolError> {
        self.pools.get(&seed).ok_or(PoolError::PoolNotFound(seed))
    }

    fn pool_mut(&mut self, seed: u64) -> Result<&mut Pool, PoolError> {
        self.pools.get_mut(&seed).ok_or(PoolError::PoolNotFound(seed))
    }

    /// Pools in seed order
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Create an empty pool under `config.seed`
    ///
    /// # Errors
    /// * `DuplicatePool` - seed already initialized
    /// * `InvalidFee`, `IdenticalAssets` - see [`process_initialize`]
    /// * `AssetConflict` - share asset or vault overlaps another pool
    pub fn initialize(&mut self, config: PoolConfig) -> Result<&Pool, PoolError> {
        if self.pools.contains_key(&config.seed) {
            log::warn!("pool {}: already initialized", config.seed);
            return Err(PoolError::DuplicatePool(config.seed));
        }
        let pool = process_initialize(config)?;
        self.insert(pool)?;
        self.pool(config.seed)
    }

    pub fn deposit(
        &mut self,
        seed: u64,
        user: &Address,
        ledger: &mut dyn TokenLedger,
        desired_shares: u64,
        max_x: u64,
        max_y: u64,
    ) -> Result<DepositAmounts, PoolError> {
        let pool = self.pool_mut(seed)?;
        process_deposit(pool, user, ledger, desired_shares, max_x, max_y)
    }

    pub fn withdraw(
        &mut self,
        seed: u64,
        user: &Address,
        ledger: &mut dyn TokenLedger,
        burn_shares: u64,
        min_x: u64,
        min_y: u64,
    ) -> Result<WithdrawAmounts, PoolError> {
        let pool = self.pool_mut(seed)?;
        process_withdraw(pool, user, ledger, burn_shares, min_x, min_y)
    }

    pub fn swap(
        &mut self,
        seed: u64,
        user: &Address,
        ledger: &mut dyn TokenLedger,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapQuote, PoolError> {
        let pool = self.pool_mut(seed)?;
        process_swap(pool, user, ledger, direction, amount_in, min_amount_out)
    }

    pub fn set_locked(&mut self, seed: u64, caller: &Address, locked: bool) -> Result<(), PoolError> {
        let pool = self.pool_mut(seed)?;
        process_set_lock(pool, caller, locked)
    }
}
