//! AMM Model - Pure constant product curve (x·y=k) for two-asset pools
//!
//! This crate holds the arithmetic that governs reserve balances, liquidity
//! share accounting and swap pricing. Every function is total: overflow and
//! division by zero are reported as [`AmmError`], never saturated.
//!
//! The pool layer (`cpamm-pool`) calls these functions directly and only
//! applies the deltas they return.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(kani)]
extern crate kani;

pub mod amounts;
pub mod curve;

pub use amounts::{checked_add, checked_sub, mul_div_ceil, mul_div_floor, narrow};
pub use curve::{
    initial_deposit, invariant, proportional_deposit, spot_price, swap, withdraw, DepositAmounts,
    SwapQuote, WithdrawAmounts,
};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Highest fee a pool may charge on swap input
pub const MAX_FEE_BPS: u16 = 10_000;

/// Error types for AMM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    /// Zero amount where a nonzero one is required, or a burn above supply
    InvalidAmount,
    /// Fee outside [0, 10_000] bps
    InvalidFee,
    /// Computed amount violates the caller's min/max bound
    SlippageExceeded,
    /// Pool too shallow for the request
    InsufficientLiquidity,
    /// Arithmetic overflow (or underflow)
    Overflow,
    /// Division by zero
    DivisionByZero,
}

impl core::fmt::Display for AmmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            AmmError::InvalidAmount => "invalid amount",
            AmmError::InvalidFee => "invalid fee",
            AmmError::SlippageExceeded => "slippage exceeded",
            AmmError::InsufficientLiquidity => "insufficient liquidity",
            AmmError::Overflow => "arithmetic overflow",
            AmmError::DivisionByZero => "division by zero",
        };
        f.write_str(msg)
    }
}
