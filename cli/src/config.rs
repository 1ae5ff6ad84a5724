//! CLI configuration: built-in defaults, optional TOML file, then flags

use anyhow::{Context, Result};
use cpamm_pool::{Address, MAX_FEE_BPS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_STATE_DIR: &str = ".cpamm";
pub const DEFAULT_CALLER: &str = "default";
pub const DEFAULT_FEE_BPS: u16 = 30;

/// Values accepted in the config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    state_dir: Option<PathBuf>,
    caller: Option<String>,
    default_fee_bps: Option<u16>,
}

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub state_dir: PathBuf,
    pub caller: Address,
    pub default_fee_bps: u16,
}

impl CliConfig {
    /// Flags override the file, the file overrides the defaults
    pub fn load(
        config_path: Option<&Path>,
        state_dir: Option<PathBuf>,
        caller: Option<String>,
    ) -> Result<Self> {
        let file = match config_path {
            Some(path) => read_file(path)?,
            None => FileConfig::default(),
        };

        let caller = match caller.or(file.caller) {
            Some(s) => parse_address(&s).context("Invalid caller address")?,
            None => Address::from_label(DEFAULT_CALLER),
        };

        let default_fee_bps = file.default_fee_bps.unwrap_or(DEFAULT_FEE_BPS);
        if default_fee_bps > MAX_FEE_BPS {
            anyhow::bail!(
                "default_fee_bps must be at most {}, got {}",
                MAX_FEE_BPS,
                default_fee_bps
            );
        }

        Ok(Self {
            state_dir: state_dir
                .or(file.state_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
            caller,
            default_fee_bps,
        })
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&data)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a base58 address from user input
pub fn parse_address(s: &str) -> Result<Address> {
    s.parse::<Address>()
        .with_context(|| format!("Invalid address: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::load(None, None, None).unwrap();
        assert_eq!(config.state_dir, PathBuf::from(DEFAULT_STATE_DIR));
        assert_eq!(config.caller, Address::from_label("default"));
        assert_eq!(config.default_fee_bps, 30);
    }

    #[test]
    fn test_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpamm.toml");
        let alice = Address::from_label("alice");
        fs::write(
            &path,
            format!(
                "state_dir = \"/tmp/pools\"\ncaller = \"{}\"\ndefault_fee_bps = 25\n",
                alice
            ),
        )
        .unwrap();

        let config = CliConfig::load(Some(&path), None, None).unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/tmp/pools"));
        assert_eq!(config.caller, alice);
        assert_eq!(config.default_fee_bps, 25);

        let bob = Address::from_label("bob");
        let config = CliConfig::load(
            Some(&path),
            Some(dir.path().to_path_buf()),
            Some(bob.to_string()),
        )
        .unwrap();
        assert_eq!(config.state_dir, dir.path());
        assert_eq!(config.caller, bob);
    }

    #[test]
    fn test_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpamm.toml");

        fs::write(&path, "default_fee_bps = 20000\n").unwrap();
        assert!(CliConfig::load(Some(&path), None, None).is_err());

        fs::write(&path, "keypair = \"id.json\"\n").unwrap();
        assert!(CliConfig::load(Some(&path), None, None).is_err());

        assert!(CliConfig::load(Some(&dir.path().join("missing.toml")), None, None).is_err());
    }

    #[test]
    fn test_bad_caller() {
        let err = CliConfig::load(None, None, Some("not-base58!".to_string())).unwrap_err();
        assert!(err.to_string().contains("Invalid caller"));
    }
}
