//! Deposit instruction - add liquidity for a chosen number of shares

use amm_model::{initial_deposit, proportional_deposit, DepositAmounts};

use super::ensure_unlocked;
use crate::{Address, LedgerOp, Pool, PoolError, TokenLedger};

/// Process deposit instruction
///
/// An empty pool takes `max_x` and `max_y` in full and mints exactly
/// `desired_shares`; otherwise the required amounts are the shares'
/// proportion of the reserves, rounded up.
///
/// Settlement pulls x and y from `user` into the vault and mints the shares
/// to `user`. The pool state changes only if settlement succeeds.
///
/// # Errors
/// * `PoolLocked` - pool is locked
/// * `InvalidAmount` - zero shares (or zero maxima on the first deposit)
/// * `SlippageExceeded` - required amounts exceed `max_x` / `max_y`
/// * `Overflow` - reserves or share supply would overflow
/// * `Ledger` - settlement rejected
pub fn process_deposit(
    pool: &mut Pool,
    user: &Address,
    ledger: &mut dyn TokenLedger,
    desired_shares: u64,
    max_x: u64,
    max_y: u64,
) -> Result<DepositAmounts, PoolError> {
    ensure_unlocked(pool)?;

    let state = pool.state;
    let amounts = if state.is_empty() {
        initial_deposit(max_x, max_y, desired_shares)
    } else {
        proportional_deposit(
            state.reserve_x,
            state.reserve_y,
            state.total_shares,
            desired_shares,
            max_x,
            max_y,
        )
    }
    .map_err(|e| {
        log::warn!("pool {}: deposit rejected: {}", pool.seed(), e);
        PoolError::from(e)
    })?;

    log::debug!(
        "pool {}: deposit {} shares requires x={} y={}",
        pool.seed(),
        amounts.shares,
        amounts.x,
        amounts.y
    );

    let next = state.with_deposit(amounts.x, amounts.y, amounts.shares)?;
    next.check()?;

    let cfg = &pool.config;
    ledger.settle(&[
        LedgerOp::Transfer {
            asset: cfg.asset_x,
            from: *user,
            to: cfg.vault,
            amount: amounts.x,
        },
        LedgerOp::Transfer {
            asset: cfg.asset_y,
            from: *user,
            to: cfg.vault,
            amount: amounts.y,
        },
        LedgerOp::Mint {
            asset: cfg.share_asset,
            to: *user,
            amount: amounts.shares,
        },
    ])
    .map_err(|e| {
        log::warn!("pool {}: deposit settlement failed: {}", pool.seed(), e);
        PoolError::from(e)
    })?;

    pool.state = next;
    log::info!(
        "pool {}: deposited x={} y={}, minted {} shares (supply {})",
        pool.seed(),
        amounts.x,
        amounts.y,
        amounts.shares,
        next.total_shares
    );

    Ok(amounts)
}
