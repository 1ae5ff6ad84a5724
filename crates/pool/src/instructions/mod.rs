pub mod initialize;
pub mod deposit;
pub mod withdraw;
pub mod swap;
pub mod set_lock;

pub use initialize::*;
pub use deposit::*;
pub use withdraw::*;
pub use swap::*;
pub use set_lock::*;

use crate::{Pool, PoolError};

/// Reject mutations on a locked pool
pub(crate) fn ensure_unlocked(pool: &Pool) -> Result<(), PoolError> {
    if pool.config.locked {
        log::warn!("pool {}: rejected, pool is locked", pool.seed());
        return Err(PoolError::PoolLocked);
    }
    Ok(())
}
