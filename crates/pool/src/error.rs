use amm_model::AmmError;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors reported by pool operations
///
/// Every error leaves the pool exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("invalid amount")]
    InvalidAmount,

    #[error("fee must be within 0..=10000 bps")]
    InvalidFee,

    #[error("pool {0} is already initialized")]
    DuplicatePool(u64),

    #[error("slippage tolerance exceeded")]
    SlippageExceeded,

    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("pool is locked")]
    PoolLocked,

    #[error("pool {0} not found")]
    PoolNotFound(u64),

    #[error("caller is not the pool authority")]
    Unauthorized,

    #[error("pool assets must be distinct")]
    IdenticalAssets,

    #[error("share asset or vault already claimed by pool {0}")]
    AssetConflict(u64),

    #[error("pool state violates its invariants")]
    CorruptState,

    #[error("ledger rejected settlement: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<AmmError> for PoolError {
    fn from(err: AmmError) -> Self {
        match err {
            AmmError::InvalidAmount => PoolError::InvalidAmount,
            AmmError::InvalidFee => PoolError::InvalidFee,
            AmmError::SlippageExceeded => PoolError::SlippageExceeded,
            AmmError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
            AmmError::Overflow => PoolError::Overflow,
            AmmError::DivisionByZero => PoolError::DivisionByZero,
        }
    }
}
