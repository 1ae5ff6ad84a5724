//! Two-asset constant product pool
//!
//! Pool state, the operations that mutate it, and the token-ledger seam the
//! operations settle through. Curve arithmetic lives in `amm_model`; this
//! crate validates inputs, applies the computed deltas and keeps every
//! transition all-or-nothing.

#![forbid(unsafe_code)]

pub mod address;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod registry;
pub mod state;

pub use address::{Address, AddressError};
pub use amm_model::{DepositAmounts, SwapQuote, WithdrawAmounts, BPS_SCALE, MAX_FEE_BPS};
pub use error::PoolError;
pub use instructions::SwapDirection;
pub use ledger::{LedgerError, LedgerOp, MemoryLedger, TokenLedger};
pub use registry::PoolRegistry;
pub use state::{Pool, PoolConfig, PoolRecord, PoolState, RecordError};
