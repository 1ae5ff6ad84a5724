//! Checked amount arithmetic
//!
//! Amounts are `u64` base units. Products of two amounts are formed in
//! `u128` and narrowed back with a round-trip check.

use crate::AmmError;

/// Narrow a wide intermediate back to `u64`
#[inline]
pub fn narrow(value: u128) -> Result<u64, AmmError> {
    u64::try_from(value).map_err(|_| AmmError::Overflow)
}

#[inline]
pub fn checked_add(a: u64, b: u64) -> Result<u64, AmmError> {
    a.checked_add(b).ok_or(AmmError::Overflow)
}

/// Subtract, reporting underflow as `Overflow`
#[inline]
pub fn checked_sub(a: u64, b: u64) -> Result<u64, AmmError> {
    a.checked_sub(b).ok_or(AmmError::Overflow)
}

/// floor(a * b / d)
///
/// # Errors
/// * `DivisionByZero` if `d == 0`
/// * `Overflow` if the quotient does not fit in `u64`
#[inline]
pub fn mul_div_floor(a: u64, b: u64, d: u64) -> Result<u64, AmmError> {
    if d == 0 {
        return Err(AmmError::DivisionByZero);
    }
    // u64 * u64 always fits in u128
    let product = (a as u128) * (b as u128);
    narrow(product / d as u128)
}

/// ceil(a * b / d)
///
/// # Errors
/// * `DivisionByZero` if `d == 0`
/// * `Overflow` if the quotient does not fit in `u64`
#[inline]
pub fn mul_div_ceil(a: u64, b: u64, d: u64) -> Result<u64, AmmError> {
    if d == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = (a as u128) * (b as u128);
    let denom = d as u128;
    let quotient = product / denom;
    let rounded = if product % denom == 0 { quotient } else { quotient + 1 };
    narrow(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div_floor(7, 3, 2), Ok(10));
        assert_eq!(mul_div_ceil(7, 3, 2), Ok(11));

        // Exact division rounds the same both ways
        assert_eq!(mul_div_floor(6, 4, 3), Ok(8));
        assert_eq!(mul_div_ceil(6, 4, 3), Ok(8));
    }

    #[test]
    fn test_wide_intermediate() {
        // a * b overflows u64 but the quotient does not
        let a = u64::MAX;
        let b = 1_000_000;
        assert_eq!(mul_div_floor(a, b, 1_000_000), Ok(u64::MAX));
        assert_eq!(mul_div_ceil(a, b, 1_000_000), Ok(u64::MAX));
    }

    #[test]
    fn test_narrowing_overflow() {
        assert_eq!(mul_div_floor(u64::MAX, 2, 1), Err(AmmError::Overflow));
        assert_eq!(mul_div_ceil(u64::MAX, u64::MAX, u64::MAX - 1), Err(AmmError::Overflow));
        assert_eq!(narrow(u64::MAX as u128 + 1), Err(AmmError::Overflow));
        assert_eq!(narrow(42), Ok(42));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(mul_div_floor(1, 1, 0), Err(AmmError::DivisionByZero));
        assert_eq!(mul_div_ceil(0, 0, 0), Err(AmmError::DivisionByZero));
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(checked_add(u64::MAX, 1), Err(AmmError::Overflow));
        assert_eq!(checked_sub(0, 1), Err(AmmError::Overflow));
        assert_eq!(checked_sub(5, 5), Ok(0));
    }
}

// ═══════════════════════════════════════════════════════════════
// KANI FORMAL VERIFICATION PROOFS
// ═══════════════════════════════════════════════════════════════

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// N1: Ceiling and floor differ by at most one
    #[kani::proof]
    fn n1_rounding_modes() {
        let a: u64 = kani::any();
        let b: u64 = kani::any();
        let d: u64 = kani::any();
        kani::assume(d > 0);

        if let (Ok(floor), Ok(ceil)) = (mul_div_floor(a, b, d), mul_div_ceil(a, b, d)) {
            assert!(ceil >= floor, "N1: ceil must be >= floor");
            assert!(ceil - floor <= 1, "N1: ceil and floor differ by at most 1");
        }
    }

    /// N2: Floor never exceeds the exact quotient
    #[kani::proof]
    fn n2_floor_bounded() {
        let a: u64 = kani::any();
        let b: u64 = kani::any();
        let d: u64 = kani::any();
        kani::assume(d > 0);

        if let Ok(floor) = mul_div_floor(a, b, d) {
            assert!((floor as u128) * (d as u128) <= (a as u128) * (b as u128));
        }
    }
}
