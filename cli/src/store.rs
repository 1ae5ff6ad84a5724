//! File-backed pool store and ledger
//!
//! `pools.bin` holds concatenated fixed-size pool records; `ledger.json`
//! holds every balance. Both are read before a command runs and written
//! back after a mutating command succeeds.

use anyhow::{Context, Result};
use cpamm_pool::{MemoryLedger, Pool, PoolRecord, PoolRegistry};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const POOLS_FILE: &str = "pools.bin";
pub const LEDGER_FILE: &str = "ledger.json";

pub struct Store {
    dir: PathBuf,
    pub registry: PoolRegistry,
    pub ledger: MemoryLedger,
}

impl Store {
    /// Load state from `dir`; missing files mean an empty store
    pub fn open(dir: &Path) -> Result<Self> {
        let pools_path = dir.join(POOLS_FILE);
        let registry = if pools_path.exists() {
            let data = fs::read(&pools_path)
                .with_context(|| format!("Failed to read {}", pools_path.display()))?;
            decode_pools(&data)
                .with_context(|| format!("Corrupt pool file: {}", pools_path.display()))?
        } else {
            PoolRegistry::new()
        };

        let ledger_path = dir.join(LEDGER_FILE);
        let ledger = if ledger_path.exists() {
            let data = fs::read_to_string(&ledger_path)
                .with_context(|| format!("Failed to read {}", ledger_path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse {}", ledger_path.display()))?
        } else {
            MemoryLedger::new()
        };

        log::debug!(
            "loaded {} pool(s) from {}",
            registry.len(),
            dir.display()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            registry,
            ledger,
        })
    }

    /// Write both files, replacing neither until both are fully staged
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create state dir: {}", self.dir.display()))?;

        let pools = encode_pools(&self.registry)?;
        let ledger = serde_json::to_vec_pretty(&self.ledger).context("Failed to encode ledger")?;

        let staged = [self.stage(POOLS_FILE, &pools)?, self.stage(LEDGER_FILE, &ledger)?];
        for (file, target) in staged {
            file.persist(&target)
                .with_context(|| format!("Failed to replace {}", target.display()))?;
        }

        log::debug!("saved {} pool(s) to {}", self.registry.len(), self.dir.display());
        Ok(())
    }

    /// Write `bytes` to a temp file next to `name`, synced to disk
    fn stage(&self, name: &str, bytes: &[u8]) -> Result<(NamedTempFile, PathBuf)> {
        let target = self.dir.join(name);
        if target.is_dir() {
            anyhow::bail!("{} is a directory", target.display());
        }

        let mut file = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("Failed to stage {}", target.display()))?;
        file.write_all(bytes)
            .and_then(|()| file.as_file().sync_all())
            .with_context(|| format!("Failed to stage {}", target.display()))?;
        Ok((file, target))
    }
}

fn encode_pools(registry: &PoolRegistry) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(registry.len() * PoolRecord::LEN);
    for pool in registry.pools() {
        let bytes = PoolRecord::from(pool)
            .pack()
            .with_context(|| format!("Failed to encode pool {}", pool.seed()))?;
        out.extend_from_slice(&bytes);
    }
    Ok(out)
}

fn decode_pools(data: &[u8]) -> Result<PoolRegistry> {
    if data.len() % PoolRecord::LEN != 0 {
        anyhow::bail!(
            "file length {} is not a multiple of the record size {}",
            data.len(),
            PoolRecord::LEN
        );
    }

    let mut pools = Vec::with_capacity(data.len() / PoolRecord::LEN);
    for (i, chunk) in data.chunks_exact(PoolRecord::LEN).enumerate() {
        let record = PoolRecord::unpack(chunk).with_context(|| format!("record {}", i))?;
        let pool = Pool::try_from(record).with_context(|| format!("record {}", i))?;
        pools.push(pool);
    }
    Ok(PoolRegistry::from_pools(pools)?)
}
