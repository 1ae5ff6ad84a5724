//! Constant product curve (x·y=k) with a basis-point fee on swap input
//!
//! Rounding always favours the pool:
//! - deposits round the required amounts **up** (depositor never underpays)
//! - withdrawals round the returned amounts **down** (withdrawer never overdraws)
//! - swaps round the fee-reduced input and the output **down**
//!
//! All functions are pure; the caller applies the returned deltas.

use crate::amounts::{mul_div_ceil, mul_div_floor, narrow};
use crate::{AmmError, BPS_SCALE, MAX_FEE_BPS};

/// Amounts a depositor must provide and the shares they receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAmounts {
    /// X pulled from the depositor
    pub x: u64,
    /// Y pulled from the depositor
    pub y: u64,
    /// Shares minted to the depositor
    pub shares: u64,
}

/// Amounts returned to a withdrawer for burned shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawAmounts {
    pub x: u64,
    pub y: u64,
}

/// Swap quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Full input added to the input reserve (fee included)
    pub amount_in: u64,
    /// Input that is priced against the curve
    pub amount_in_after_fee: u64,
    /// Portion of the input retained by the pool as fee
    pub fee: u64,
    /// Output paid from the output reserve
    pub amount_out: u64,
}

/// First deposit into an empty pool
///
/// The depositor sets the initial price by the ratio of `max_x` to `max_y`
/// and chooses how many shares represent it. Both maxima are taken in full.
///
/// # Errors
/// * `InvalidAmount` if any argument is zero
pub fn initial_deposit(
    max_x: u64,
    max_y: u64,
    desired_shares: u64,
) -> Result<DepositAmounts, AmmError> {
    if max_x == 0 || max_y == 0 || desired_shares == 0 {
        return Err(AmmError::InvalidAmount);
    }

    Ok(DepositAmounts {
        x: max_x,
        y: max_y,
        shares: desired_shares,
    })
}

/// Deposit into a pool that already has shares outstanding
///
/// # Formula
/// - required_x = ⌈desired_shares · reserve_x / total_shares⌉
/// - required_y = ⌈desired_shares · reserve_y / total_shares⌉
///
/// # Errors
/// * `InvalidAmount` if `desired_shares == 0`
/// * `DivisionByZero` if `total_shares == 0` (use [`initial_deposit`])
/// * `SlippageExceeded` if a required amount is above its maximum
/// * `Overflow` if a required amount does not fit in `u64`
pub fn proportional_deposit(
    reserve_x: u64,
    reserve_y: u64,
    total_shares: u64,
    desired_shares: u64,
    max_x: u64,
    max_y: u64,
) -> Result<DepositAmounts, AmmError> {
    if desired_shares == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let x = mul_div_ceil(desired_shares, reserve_x, total_shares)?;
    let y = mul_div_ceil(desired_shares, reserve_y, total_shares)?;

    if x > max_x || y > max_y {
        return Err(AmmError::SlippageExceeded);
    }

    Ok(DepositAmounts {
        x,
        y,
        shares: desired_shares,
    })
}

/// Burn shares for a proportional slice of both reserves
///
/// # Formula
/// - out_x = ⌊burn_shares · reserve_x / total_shares⌋
/// - out_y = ⌊burn_shares · reserve_y / total_shares⌋
///
/// Burning the entire supply returns both reserves exactly.
///
/// # Errors
/// * `InvalidAmount` if `burn_shares == 0` or `burn_shares > total_shares`
/// * `SlippageExceeded` if an output is below its minimum
pub fn withdraw(
    reserve_x: u64,
    reserve_y: u64,
    total_shares: u64,
    burn_shares: u64,
    min_x: u64,
    min_y: u64,
) -> Result<WithdrawAmounts, AmmError> {
    if burn_shares == 0 || burn_shares > total_shares {
        return Err(AmmError::InvalidAmount);
    }

    let x = mul_div_floor(burn_shares, reserve_x, total_shares)?;
    let y = mul_div_floor(burn_shares, reserve_y, total_shares)?;

    if x < min_x || y < min_y {
        return Err(AmmError::SlippageExceeded);
    }

    Ok(WithdrawAmounts { x, y })
}

/// Quote a swap of `amount_in` against `(reserve_in, reserve_out)`
///
/// # Formula
/// - in_after_fee = ⌊amount_in · (10_000 - fee_bps) / 10_000⌋
/// - amount_out = reserve_out - ⌈reserve_in · reserve_out / (reserve_in + in_after_fee)⌉
///
/// The retained output reserve is rounded up, so the output is never more
/// than the exact curve value. This departs from the common floored form
/// `reserve_out - ⌊k / (reserve_in + in_after_fee)⌋`, which can pay one unit
/// more and shrink k on small pools (1000/1000, 100 in at 30 bps:
/// `1100 · 909 < 10⁶`). Against 150M/150M reserves, 10M in at 30 bps pays
/// 9_348_627 here where the floored form pays 9_348_628.
///
/// The caller adds the full `amount_in` to the input reserve, so the fee
/// stays in the pool and x·y never decreases (strictly increases when
/// `fee_bps > 0`).
///
/// # Errors
/// * `InvalidAmount` if `amount_in == 0`
/// * `InvalidFee` if `fee_bps > 10_000`
/// * `InsufficientLiquidity` if either reserve is empty, or the output
///   would drain the output reserve
/// * `SlippageExceeded` if the output is zero or below `min_amount_out`
pub fn swap(
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u16,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<SwapQuote, AmmError> {
    if amount_in == 0 {
        return Err(AmmError::InvalidAmount);
    }
    if fee_bps > MAX_FEE_BPS {
        return Err(AmmError::InvalidFee);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    let amount_in_after_fee = mul_div_floor(amount_in, BPS_SCALE - fee_bps as u64, BPS_SCALE)?;

    // ⌈k / (x + Δx)⌉ in u128; at most reserve_out and at least 1
    let k = invariant(reserve_in, reserve_out);
    let denom = reserve_in as u128 + amount_in_after_fee as u128;
    let quotient = k / denom;
    let new_out = narrow(if k % denom == 0 { quotient } else { quotient + 1 })?;
    let amount_out = reserve_out
        .checked_sub(new_out)
        .ok_or(AmmError::Overflow)?;

    if amount_out == 0 || amount_out < min_amount_out {
        return Err(AmmError::SlippageExceeded);
    }
    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }

    Ok(SwapQuote {
        amount_in,
        amount_in_after_fee,
        fee: amount_in - amount_in_after_fee,
        amount_out,
    })
}

/// Constant product k = x · y
#[inline]
pub fn invariant(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// Marginal price of the input asset in output units, scaled by `scale`
///
/// Display only; swaps never consult it.
pub fn spot_price(reserve_in: u64, reserve_out: u64, scale: u64) -> Result<u64, AmmError> {
    mul_div_floor(reserve_out, scale, reserve_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: u64 = 1_000_000;

    #[test]
    fn test_initial_deposit_takes_maxima() {
        let d = initial_deposit(100 * M, 100 * M, 100 * M).unwrap();
        assert_eq!(d, DepositAmounts { x: 100 * M, y: 100 * M, shares: 100 * M });

        // Caller chooses the price and share count freely
        let d = initial_deposit(3, 7, 1).unwrap();
        assert_eq!((d.x, d.y, d.shares), (3, 7, 1));
    }

    #[test]
    fn test_initial_deposit_rejects_zero() {
        assert_eq!(initial_deposit(0, 1, 1), Err(AmmError::InvalidAmount));
        assert_eq!(initial_deposit(1, 0, 1), Err(AmmError::InvalidAmount));
        assert_eq!(initial_deposit(1, 1, 0), Err(AmmError::InvalidAmount));
    }

    #[test]
    fn test_proportional_deposit_even() {
        let d = proportional_deposit(100 * M, 100 * M, 100 * M, 50 * M, 50 * M, 50 * M).unwrap();
        assert_eq!(d, DepositAmounts { x: 50 * M, y: 50 * M, shares: 50 * M });
    }

    #[test]
    fn test_proportional_deposit_rounds_up() {
        // 1 share of a 3-share pool holding (10, 20): exact 3.33 / 6.67
        let d = proportional_deposit(10, 20, 3, 1, u64::MAX, u64::MAX).unwrap();
        assert_eq!((d.x, d.y), (4, 7));
    }

    #[test]
    fn test_proportional_deposit_slippage() {
        assert_eq!(
            proportional_deposit(100, 100, 100, 50, 49, 50),
            Err(AmmError::SlippageExceeded)
        );
        assert_eq!(
            proportional_deposit(100, 100, 100, 50, 50, 49),
            Err(AmmError::SlippageExceeded)
        );
        // Rounding up can push an exact-looking max over
        assert_eq!(
            proportional_deposit(10, 20, 3, 1, 3, 7),
            Err(AmmError::SlippageExceeded)
        );
    }

    #[test]
    fn test_proportional_deposit_zero_and_empty() {
        assert_eq!(proportional_deposit(100, 100, 100, 0, 100, 100), Err(AmmError::InvalidAmount));
        assert_eq!(proportional_deposit(0, 0, 0, 10, 100, 100), Err(AmmError::DivisionByZero));
    }

    #[test]
    fn test_proportional_deposit_overflow() {
        // Asking for far more shares than exist on a deep pool
        assert_eq!(
            proportional_deposit(u64::MAX, 1, 1, 2, u64::MAX, u64::MAX),
            Err(AmmError::Overflow)
        );
    }

    #[test]
    fn test_withdraw_rounds_down() {
        let w = withdraw(10, 20, 3, 1, 0, 0).unwrap();
        assert_eq!(w, WithdrawAmounts { x: 3, y: 6 });
    }

    #[test]
    fn test_withdraw_everything_returns_reserves() {
        let w = withdraw(123_457, 987_651, 333_333, 333_333, 0, 0).unwrap();
        assert_eq!(w, WithdrawAmounts { x: 123_457, y: 987_651 });
    }

    #[test]
    fn test_withdraw_errors() {
        assert_eq!(withdraw(100, 100, 100, 0, 0, 0), Err(AmmError::InvalidAmount));
        assert_eq!(withdraw(100, 100, 100, 101, 0, 0), Err(AmmError::InvalidAmount));
        assert_eq!(withdraw(100, 100, 100, 10, 11, 0), Err(AmmError::SlippageExceeded));
        assert_eq!(withdraw(100, 100, 100, 10, 0, 11), Err(AmmError::SlippageExceeded));
    }

    #[test]
    fn test_swap_reference_values() {
        let reserve = 150 * M;
        let q = swap(reserve, reserve, 30, 10 * M, 1).unwrap();

        assert_eq!(q.amount_in_after_fee, 9_970_000);
        assert_eq!(q.fee, 30_000);
        // 150M - ⌈150M² / 159.97M⌉; the floored quotient would pay one unit more
        let k = reserve as u128 * reserve as u128;
        assert_eq!(k / 159_970_000, 140_651_372);
        assert_ne!(k % 159_970_000, 0);
        assert_eq!(q.amount_out, 9_348_627);
        assert!(q.amount_out < q.amount_in);
    }

    #[test]
    fn test_swap_invariant_increases_with_fee() {
        let (x0, y0) = (150 * M, 150 * M);
        let q = swap(x0, y0, 30, 10 * M, 0).unwrap();

        let k0 = invariant(x0, y0);
        let k1 = invariant(x0 + q.amount_in, y0 - q.amount_out);
        assert!(k1 > k0, "Invariant should increase due to fees");
    }

    #[test]
    fn test_swap_zero_fee_keeps_invariant() {
        let (x0, y0) = (1_000 * M, 4_000 * M);
        let q = swap(x0, y0, 0, 7 * M, 0).unwrap();

        assert_eq!(q.fee, 0);
        assert!(invariant(x0 + q.amount_in, y0 - q.amount_out) >= invariant(x0, y0));
    }

    #[test]
    fn test_swap_fee_accounting() {
        let with_fee = swap(1_000 * M, 1_000 * M, 100, 10 * M, 0).unwrap();
        let no_fee = swap(1_000 * M, 1_000 * M, 0, 10 * M, 0).unwrap();
        assert!(with_fee.amount_out < no_fee.amount_out);
    }

    #[test]
    fn test_swap_errors() {
        assert_eq!(swap(100, 100, 30, 0, 0), Err(AmmError::InvalidAmount));
        assert_eq!(swap(100, 100, 10_001, 10, 0), Err(AmmError::InvalidFee));
        assert_eq!(swap(0, 100, 30, 10, 0), Err(AmmError::InsufficientLiquidity));
        assert_eq!(swap(100, 0, 30, 10, 0), Err(AmmError::InsufficientLiquidity));
        assert_eq!(swap(150 * M, 150 * M, 30, 10 * M, 50 * M), Err(AmmError::SlippageExceeded));
    }

    #[test]
    fn test_swap_nothing_out_is_slippage() {
        // 100% fee prices nothing against the curve
        assert_eq!(swap(1_000, 1_000, 10_000, 500, 0), Err(AmmError::SlippageExceeded));
        // Fee rounds a dust input down to nothing
        assert_eq!(swap(1_000, 1_000, 30, 1, 0), Err(AmmError::SlippageExceeded));
        // ⌈1·1 / 6⌉ = 1 keeps the only unit in the pool
        assert_eq!(swap(1, 1, 0, 5, 0), Err(AmmError::SlippageExceeded));
    }

    #[test]
    fn test_swap_cannot_drain() {
        let q = swap(1_000, 1_000, 0, u64::MAX / 2, 0).unwrap();
        assert_eq!(q.amount_out, 999);
    }

    #[test]
    fn test_swap_small_pool_keeps_invariant() {
        // A floored retained reserve would shrink k here: 1100 · 909 < 1000²
        let q = swap(1_000, 1_000, 30, 100, 0).unwrap();
        assert_eq!(q.amount_in_after_fee, 99);
        assert_eq!(q.amount_out, 90);
        assert!(invariant(1_100, 1_000 - q.amount_out) > invariant(1_000, 1_000));
    }

    #[test]
    fn test_round_trip_loses_to_fees() {
        let (x0, y0) = (500 * M, 500 * M);
        let there = swap(x0, y0, 30, 20 * M, 0).unwrap();
        let (x1, y1) = (x0 + there.amount_in, y0 - there.amount_out);

        let back = swap(y1, x1, 30, there.amount_out, 0).unwrap();
        assert!(back.amount_out < there.amount_in, "Round-trip should lose to fees");
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(spot_price(1_000, 2_000, M), Ok(2 * M));
        assert_eq!(spot_price(0, 2_000, M), Err(AmmError::DivisionByZero));
    }
}

// ═══════════════════════════════════════════════════════════════
// KANI FORMAL VERIFICATION PROOFS
// ═══════════════════════════════════════════════════════════════

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// C1: x·y never decreases across a swap
    #[kani::proof]
    fn c1_swap_invariant_non_decreasing() {
        let x0: u64 = kani::any();
        let y0: u64 = kani::any();
        let dx: u64 = kani::any();
        let fee_bps: u16 = kani::any();

        kani::assume(x0 > 0 && x0 < 1 << 40);
        kani::assume(y0 > 0 && y0 < 1 << 40);
        kani::assume(dx > 0 && dx < 1 << 40);
        kani::assume(fee_bps <= MAX_FEE_BPS);

        if let Ok(q) = swap(x0, y0, fee_bps, dx, 0) {
            let k0 = invariant(x0, y0);
            let k1 = invariant(x0 + q.amount_in, y0 - q.amount_out);
            assert!(k1 >= k0, "C1: invariant must not decrease");
            assert!(q.amount_out < y0, "C1: output reserve never drained");
        }
    }

    /// C2: Deposit then withdraw of the same shares never pays out more than was paid in
    #[kani::proof]
    fn c2_deposit_withdraw_no_profit() {
        let x: u64 = kani::any();
        let y: u64 = kani::any();
        let total: u64 = kani::any();
        let shares: u64 = kani::any();

        kani::assume(x > 0 && x < 1 << 32);
        kani::assume(y > 0 && y < 1 << 32);
        kani::assume(total > 0 && total < 1 << 32);
        kani::assume(shares > 0 && shares < 1 << 32);

        if let Ok(d) = proportional_deposit(x, y, total, shares, u64::MAX, u64::MAX) {
            let w = withdraw(x + d.x, y + d.y, total + shares, shares, 0, 0).unwrap();
            assert!(w.x <= d.x, "C2: withdrawer cannot gain X");
            assert!(w.y <= d.y, "C2: withdrawer cannot gain Y");
        }
    }
}
