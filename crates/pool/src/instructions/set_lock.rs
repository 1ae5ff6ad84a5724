//! SetLock instruction
//!
//! Lets the pool authority halt or resume deposit, withdraw and swap.
//! A pool created without an authority can never be locked.

use crate::{Address, Pool, PoolError};

/// Process set_lock instruction
///
/// # Errors
/// * `Unauthorized` - caller is not the pool authority
pub fn process_set_lock(pool: &mut Pool, caller: &Address, locked: bool) -> Result<(), PoolError> {
    if !pool.config.is_authority(caller) {
        log::warn!("pool {}: {} may not change the lock", pool.seed(), caller);
        return Err(PoolError::Unauthorized);
    }

    pool.config.locked = locked;
    log::info!(
        "pool {} {}",
        pool.seed(),
        if locked { "locked" } else { "unlocked" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_authority_toggles_lock() {
        let mut pool = pool(30);
        process_set_lock(&mut pool, &addr("admin"), true).unwrap();
        assert!(pool.config.locked);

        // Idempotent, and allowed while locked
        process_set_lock(&mut pool, &addr("admin"), true).unwrap();
        process_set_lock(&mut pool, &addr("admin"), false).unwrap();
        assert!(!pool.config.locked);
    }

    #[test]
    fn test_non_authority_rejected() {
        let mut pool = pool(30);
        assert_eq!(
            process_set_lock(&mut pool, &addr("mallory"), true),
            Err(PoolError::Unauthorized)
        );
        assert!(!pool.config.locked);

        pool.config.authority = None;
        assert_eq!(
            process_set_lock(&mut pool, &addr("admin"), true),
            Err(PoolError::Unauthorized)
        );
    }
}
