//! Initialize instruction - create an empty pool

use crate::{Pool, PoolConfig, PoolError};

/// Process initialize instruction
///
/// Validates the configuration and returns a fresh pool with zero reserves
/// and zero shares. The registry rejects a seed that is already taken.
///
/// # Errors
/// * `InvalidFee` - fee above 10_000 bps
/// * `IdenticalAssets` - x, y and the share asset are not pairwise distinct
pub fn process_initialize(config: PoolConfig) -> Result<Pool, PoolError> {
    config.validate()?;

    let pool = Pool::new(PoolConfig {
        locked: false,
        ..config
    });

    log::info!(
        "pool {} initialized: fee {} bps, x={}, y={}, shares={}",
        config.seed,
        config.fee_bps,
        config.asset_x,
        config.asset_y,
        config.share_asset,
    );

    Ok(pool)
}
