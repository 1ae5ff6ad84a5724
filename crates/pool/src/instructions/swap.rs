//! Swap instruction - trade one pool asset for the other

use core::fmt;
use core::str::FromStr;

use amm_model::{checked_add, checked_sub, swap, SwapQuote};

use super::ensure_unlocked;
use crate::{Address, LedgerOp, Pool, PoolError, PoolState, TokenLedger};

/// Which asset the caller pays in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    XtoY,
    YtoX,
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::XtoY => f.write_str("x-to-y"),
            SwapDirection::YtoX => f.write_str("y-to-x"),
        }
    }
}

impl FromStr for SwapDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x-to-y" | "xtoy" | "x" => Ok(SwapDirection::XtoY),
            "y-to-x" | "ytox" | "y" => Ok(SwapDirection::YtoX),
            other => Err(format!("unknown swap direction: {other} (use x-to-y or y-to-x)")),
        }
    }
}

/// Input/output sides of a swap, resolved once from the direction
struct Sides {
    reserve_in: u64,
    reserve_out: u64,
    asset_in: Address,
    asset_out: Address,
}

fn resolve(pool: &Pool, direction: SwapDirection) -> Sides {
    let (cfg, state) = (&pool.config, &pool.state);
    match direction {
        SwapDirection::XtoY => Sides {
            reserve_in: state.reserve_x,
            reserve_out: state.reserve_y,
            asset_in: cfg.asset_x,
            asset_out: cfg.asset_y,
        },
        SwapDirection::YtoX => Sides {
            reserve_in: state.reserve_y,
            reserve_out: state.reserve_x,
            asset_in: cfg.asset_y,
            asset_out: cfg.asset_x,
        },
    }
}

/// Process swap instruction
///
/// The full `amount_in` (fee included) joins the input reserve and
/// `amount_out` leaves the output reserve, so x·y never decreases.
///
/// # Errors
/// * `PoolLocked` - pool is locked
/// * `InsufficientLiquidity` - pool has no shares outstanding
/// * `InvalidAmount` - zero input
/// * `SlippageExceeded` - output is zero or below `min_amount_out`
/// * `Overflow` - input reserve would overflow
/// * `Ledger` - settlement rejected
pub fn process_swap(
    pool: &mut Pool,
    user: &Address,
    ledger: &mut dyn TokenLedger,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<SwapQuote, PoolError> {
    ensure_unlocked(pool)?;

    if pool.state.is_empty() {
        log::warn!("pool {}: swap rejected, pool is empty", pool.seed());
        return Err(PoolError::InsufficientLiquidity);
    }

    let sides = resolve(pool, direction);
    let quote = swap(
        sides.reserve_in,
        sides.reserve_out,
        pool.config.fee_bps,
        amount_in,
        min_amount_out,
    )
    .map_err(|e| {
        log::warn!("pool {}: swap {} rejected: {}", pool.seed(), direction, e);
        PoolError::from(e)
    })?;

    log::debug!(
        "pool {}: swap {} in={} (after fee {}) out={}",
        pool.seed(),
        direction,
        quote.amount_in,
        quote.amount_in_after_fee,
        quote.amount_out
    );

    let new_in = checked_add(sides.reserve_in, quote.amount_in)?;
    let new_out = checked_sub(sides.reserve_out, quote.amount_out)?;
    let next = match direction {
        SwapDirection::XtoY => PoolState {
            reserve_x: new_in,
            reserve_y: new_out,
            ..pool.state
        },
        SwapDirection::YtoX => PoolState {
            reserve_x: new_out,
            reserve_y: new_in,
            ..pool.state
        },
    };
    next.check()?;
    if next.invariant() < pool.state.invariant() {
        return Err(PoolError::CorruptState);
    }

    let vault = pool.config.vault;
    ledger
        .settle(&[
            LedgerOp::Transfer {
                asset: sides.asset_in,
                from: *user,
                to: vault,
                amount: quote.amount_in,
            },
            LedgerOp::Transfer {
                asset: sides.asset_out,
                from: vault,
                to: *user,
                amount: quote.amount_out,
            },
        ])
        .map_err(|e| {
            log::warn!("pool {}: swap settlement failed: {}", pool.seed(), e);
            PoolError::from(e)
        })?;

    pool.state = next;
    log::info!(
        "pool {}: swapped {} {} for {} (fee {}), reserves x={} y={}",
        pool.seed(),
        quote.amount_in,
        direction,
        quote.amount_out,
        quote.fee,
        next.reserve_x,
        next.reserve_y
    );

    Ok(quote)
}
