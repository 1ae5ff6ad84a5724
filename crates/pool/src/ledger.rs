//! Token ledger seam
//!
//! Pool operations never move balances themselves. They hand the ledger an
//! ordered batch of instructions and commit their own state only when the
//! whole batch settles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Address;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{owner} holds {available} of {asset}, needs {needed}")]
    InsufficientFunds {
        asset: Address,
        owner: Address,
        needed: u64,
        available: u64,
    },

    #[error("balance or supply overflow")]
    Overflow,

    #[error("{0}")]
    Rejected(String),
}

/// A single ledger instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    Transfer {
        asset: Address,
        from: Address,
        to: Address,
        amount: u64,
    },
    Mint {
        asset: Address,
        to: Address,
        amount: u64,
    },
    Burn {
        asset: Address,
        from: Address,
        amount: u64,
    },
}

/// Balance-holding collaborator
///
/// `settle` applies a batch atomically: either every instruction takes
/// effect or none does.
pub trait TokenLedger {
    fn settle(&mut self, ops: &[LedgerOp]) -> Result<(), LedgerError>;

    fn balance(&self, asset: &Address, owner: &Address) -> u64;

    fn supply(&self, asset: &Address) -> u64;

    fn transfer(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.settle(&[LedgerOp::Transfer { asset, from, to, amount }])
    }

    fn mint(&mut self, asset: Address, to: Address, amount: u64) -> Result<(), LedgerError> {
        self.settle(&[LedgerOp::Mint { asset, to, amount }])
    }

    fn burn(&mut self, asset: Address, from: Address, amount: u64) -> Result<(), LedgerError> {
        self.settle(&[LedgerOp::Burn { asset, from, amount }])
    }
}

/// In-memory ledger: asset → owner → balance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLedger {
    balances: BTreeMap<Address, BTreeMap<Address, u64>>,
    supplies: BTreeMap<Address, u64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` of `asset` out of thin air for `owner`
    pub fn credit(&mut self, asset: Address, owner: Address, amount: u64) -> Result<(), LedgerError> {
        self.mint(asset, owner, amount)
    }

    /// Every non-zero balance of `owner`, by asset
    pub fn holdings(&self, owner: &Address) -> Vec<(Address, u64)> {
        self.balances
            .iter()
            .filter_map(|(asset, owners)| {
                owners
                    .get(owner)
                    .filter(|amount| **amount > 0)
                    .map(|amount| (*asset, *amount))
            })
            .collect()
    }

    fn debit(&mut self, asset: &Address, owner: &Address, amount: u64) -> Result<(), LedgerError> {
        let available = self.balance(asset, owner);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                asset: *asset,
                owner: *owner,
                needed: amount,
                available,
            });
        }
        self.balances
            .entry(*asset)
            .or_default()
            .insert(*owner, available - amount);
        Ok(())
    }

    fn deposit(&mut self, asset: &Address, owner: &Address, amount: u64) -> Result<(), LedgerError> {
        let slot = self.balances.entry(*asset).or_default().entry(*owner).or_default();
        *slot = slot.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn apply(&mut self, op: &LedgerOp) -> Result<(), LedgerError> {
        match op {
            LedgerOp::Transfer { asset, from, to, amount } => {
                self.debit(asset, from, *amount)?;
                self.deposit(asset, to, *amount)
            }
            LedgerOp::Mint { asset, to, amount } => {
                let supply = self.supplies.entry(*asset).or_default();
                *supply = supply.checked_add(*amount).ok_or(LedgerError::Overflow)?;
                self.deposit(asset, to, *amount)
            }
            LedgerOp::Burn { asset, from, amount } => {
                self.debit(asset, from, *amount)?;
                let supply = self.supplies.entry(*asset).or_default();
                *supply = supply.checked_sub(*amount).ok_or(LedgerError::Overflow)?;
                Ok(())
            }
        }
    }
}

impl TokenLedger for MemoryLedger {
    fn settle(&mut self, ops: &[LedgerOp]) -> Result<(), LedgerError> {
        // Stage on a copy, swap in only when every op applied
        let mut staged = self.clone();
        for op in ops {
            staged.apply(op)?;
        }
        *self = staged;
        Ok(())
    }

    fn balance(&self, asset: &Address, owner: &Address) -> u64 {
        self.balances
            .get(asset)
            .and_then(|owners| owners.get(owner))
            .copied()
            .unwrap_or(0)
    }

    fn supply(&self, asset: &Address) -> u64 {
        self.supplies.get(asset).copied().unwrap_or(0)
    }
}
