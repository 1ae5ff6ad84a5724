//! Fixed-size persisted layout of a pool
//!
//! Layout (little-endian, bincode fixed-int encoding):
//! - version: u8
//! - seed: u64
//! - fee_bps: u16
//! - locked: u8 (bool)
//! - has_authority: u8 (bool)
//! - authority, asset_x, asset_y, share_asset, vault: 5 × 32 bytes
//! - reserve_x, reserve_y, total_shares: 3 × u64

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Pool, PoolConfig, PoolState};
use crate::{Address, PoolError};

/// Current record layout version
pub const RECORD_VERSION: u8 = 1;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record must be {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("unsupported record version {0}")]
    Version(u8),

    #[error("record encoding: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("record holds an invalid pool: {0}")]
    Invalid(#[from] PoolError),
}

/// On-disk pool record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub version: u8,
    pub seed: u64,
    pub fee_bps: u16,
    pub locked: bool,
    pub has_authority: bool,
    pub authority: [u8; 32],
    pub asset_x: [u8; 32],
    pub asset_y: [u8; 32],
    pub share_asset: [u8; 32],
    pub vault: [u8; 32],
    pub reserve_x: u64,
    pub reserve_y: u64,
    pub total_shares: u64,
}

impl PoolRecord {
    /// Encoded size in bytes
    pub const LEN: usize = 1 + 8 + 2 + 1 + 1 + 5 * Address::LEN + 3 * 8;

    pub fn pack(&self) -> Result<Vec<u8>, RecordError> {
        let bytes = bincode::serialize(self)?;
        debug_assert_eq!(bytes.len(), Self::LEN);
        Ok(bytes)
    }

    pub fn unpack(data: &[u8]) -> Result<Self, RecordError> {
        if data.len() != Self::LEN {
            return Err(RecordError::Length {
                expected: Self::LEN,
                actual: data.len(),
            });
        }
        // Version byte leads the record
        if data[0] != RECORD_VERSION {
            return Err(RecordError::Version(data[0]));
        }
        Ok(bincode::deserialize(data)?)
    }
}

impl From<&Pool> for PoolRecord {
    fn from(pool: &Pool) -> Self {
        let cfg = &pool.config;
        Self {
            version: RECORD_VERSION,
            seed: cfg.seed,
            fee_bps: cfg.fee_bps,
            locked: cfg.locked,
            has_authority: cfg.authority.is_some(),
            authority: cfg.authority.unwrap_or_default().to_bytes(),
            asset_x: cfg.asset_x.to_bytes(),
            asset_y: cfg.asset_y.to_bytes(),
            share_asset: cfg.share_asset.to_bytes(),
            vault: cfg.vault.to_bytes(),
            reserve_x: pool.state.reserve_x,
            reserve_y: pool.state.reserve_y,
            total_shares: pool.state.total_shares,
        }
    }
}

impl TryFrom<PoolRecord> for Pool {
    type Error = RecordError;

    fn try_from(record: PoolRecord) -> Result<Self, Self::Error> {
        let config = PoolConfig {
            seed: record.seed,
            fee_bps: record.fee_bps,
            asset_x: Address(record.asset_x),
            asset_y: Address(record.asset_y),
            share_asset: Address(record.share_asset),
            vault: Address(record.vault),
            authority: record.has_authority.then_some(Address(record.authority)),
            locked: record.locked,
        };
        let state = PoolState {
            reserve_x: record.reserve_x,
            reserve_y: record.reserve_y,
            total_shares: record.total_shares,
        };
        config.validate()?;
        state.check()?;
        Ok(Pool { config, state })
    }
}
