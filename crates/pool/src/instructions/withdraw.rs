//! Withdraw instruction - burn shares for a proportional slice of reserves

use amm_model::{withdraw, WithdrawAmounts};

use super::ensure_unlocked;
use crate::{Address, LedgerOp, Pool, PoolError, TokenLedger};

/// Process withdraw instruction
///
/// Returns ⌊burn_shares · reserve / total_shares⌋ of each asset. Burning the
/// whole supply empties the pool, which can then take a fresh first deposit.
///
/// # Errors
/// * `PoolLocked` - pool is locked
/// * `InvalidAmount` - zero shares, or more than the outstanding supply
/// * `SlippageExceeded` - an output is below `min_x` / `min_y`
/// * `Ledger` - settlement rejected (e.g. user holds fewer shares)
pub fn process_withdraw(
    pool: &mut Pool,
    user: &Address,
    ledger: &mut dyn TokenLedger,
    burn_shares: u64,
    min_x: u64,
    min_y: u64,
) -> Result<WithdrawAmounts, PoolError> {
    ensure_unlocked(pool)?;

    let state = pool.state;
    let amounts = withdraw(
        state.reserve_x,
        state.reserve_y,
        state.total_shares,
        burn_shares,
        min_x,
        min_y,
    )
    .map_err(|e| {
        log::warn!("pool {}: withdraw rejected: {}", pool.seed(), e);
        PoolError::from(e)
    })?;

    let next = state.with_withdrawal(amounts.x, amounts.y, burn_shares)?;
    next.check()?;

    let cfg = &pool.config;
    ledger
        .settle(&[
            LedgerOp::Burn {
                asset: cfg.share_asset,
                from: *user,
                amount: burn_shares,
            },
            LedgerOp::Transfer {
                asset: cfg.asset_x,
                from: cfg.vault,
                to: *user,
                amount: amounts.x,
            },
            LedgerOp::Transfer {
                asset: cfg.asset_y,
                from: cfg.vault,
                to: *user,
                amount: amounts.y,
            },
        ])
        .map_err(|e| {
            log::warn!("pool {}: withdraw settlement failed: {}", pool.seed(), e);
            PoolError::from(e)
        })?;

    pool.state = next;
    log::info!(
        "pool {}: burned {} shares for x={} y={} (supply {})",
        pool.seed(),
        burn_shares,
        amounts.x,
        amounts.y,
        next.total_shares
    );

    Ok(amounts)
}
