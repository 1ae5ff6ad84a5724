//! Local accounts: funding, balances and address derivation

use anyhow::{Context, Result};
use colored::Colorize;
use cpamm_pool::{Address, TokenLedger};

use crate::{config::CliConfig, store::Store};

/// Mint `amount` of `asset` to `to` (defaults to the caller)
///
/// Refuses any pool's share asset and any pool vault as recipient.
pub fn faucet(
    config: &CliConfig,
    store: &mut Store,
    asset: Address,
    amount: u64,
    to: Option<Address>,
) -> Result<()> {
    let owner = to.unwrap_or(config.caller);

    if let Some(seed) = store.registry.share_asset_owner(&asset) {
        anyhow::bail!("{} is the share asset of pool {}; shares are minted by deposit", asset, seed);
    }
    if let Some(seed) = store.registry.vault_owner(&owner) {
        anyhow::bail!("{} is the vault of pool {}", owner, seed);
    }

    println!("{}", "=== Faucet ===".bright_green().bold());
    println!("{} {}", "Asset:".bright_cyan(), asset);
    println!("{} {}", "Recipient:".bright_cyan(), owner);
    println!("{} {}", "Amount:".bright_cyan(), amount);

    store
        .ledger
        .credit(asset, owner, amount)
        .context("Faucet mint failed")?;

    println!(
        "\n{} {}",
        "New balance:".bright_cyan(),
        store.ledger.balance(&asset, &owner)
    );
    Ok(())
}

pub fn show_balances(config: &CliConfig, store: &Store, owner: Option<Address>) -> Result<()> {
    let owner = owner.unwrap_or(config.caller);

    println!("{}", "=== Balances ===".bright_green().bold());
    println!("{} {}", "Owner:".bright_cyan(), owner);

    let holdings = store.ledger.holdings(&owner);
    if holdings.is_empty() {
        println!("\n{}", "No balances".dimmed());
        return Ok(());
    }
    for (asset, amount) in holdings {
        println!("  {} {} {}", "├─".dimmed(), asset, amount);
    }
    Ok(())
}

/// Print the address derived from `name`, for use in scripts
pub fn derive_address(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Address label must not be empty");
    }
    if name.len() > Address::LEN {
        log::warn!("label longer than {} bytes is truncated", Address::LEN);
    }
    println!("{}", Address::from_label(name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidity::{add_liquidity, remove_liquidity};
    use crate::pool::{initialize_pool, vault_address};

    #[test]
    fn test_faucet_defaults_to_caller() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            state_dir: dir.path().to_path_buf(),
            caller: Address::from_label("alice"),
            default_fee_bps: 30,
        };
        let usdc = Address::from_label("usdc");
        let bob = Address::from_label("bob");

        let mut store = Store::open(dir.path()).unwrap();
        faucet(&config, &mut store, usdc, 500, None).unwrap();
        faucet(&config, &mut store, usdc, 200, Some(bob)).unwrap();
        assert!(faucet(&config, &mut store, usdc, u64::MAX, None).is_err());

        assert_eq!(store.ledger.balance(&usdc, &config.caller), 500);
        assert_eq!(store.ledger.balance(&usdc, &bob), 200);
        assert_eq!(store.ledger.supply(&usdc), 700);
        show_balances(&config, &store, None).unwrap();
    }

    #[test]
    fn test_faucet_cannot_mint_shares_or_fund_vaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            state_dir: dir.path().to_path_buf(),
            caller: Address::from_label("provider"),
            default_fee_bps: 30,
        };
        let (x, y, lp) = (
            Address::from_label("x"),
            Address::from_label("y"),
            Address::from_label("lp"),
        );

        let mut store = Store::open(dir.path()).unwrap();
        initialize_pool(&config, &mut store, 1, None, x, y, lp, None).unwrap();
        faucet(&config, &mut store, x, 1_000, None).unwrap();
        faucet(&config, &mut store, y, 1_000, None).unwrap();
        add_liquidity(&config, &mut store, 1, 100, 1_000, 1_000).unwrap();

        // Minted shares would redeem the provider's deposit
        let thief = CliConfig { caller: Address::from_label("thief"), ..config.clone() };
        let err = faucet(&thief, &mut store, lp, 100, None).unwrap_err();
        assert!(err.to_string().contains("share asset of pool 1"));
        assert!(remove_liquidity(&thief, &mut store, 1, 100, 0, 0).is_err());

        assert!(faucet(&thief, &mut store, x, 1, Some(vault_address(1))).is_err());

        let pool = store.registry.pool(1).unwrap();
        assert_eq!(pool.state.reserve_x, 1_000);
        assert_eq!(store.ledger.supply(&lp), pool.state.total_shares);
        assert_eq!(store.ledger.balance(&x, &thief.caller), 0);
    }

    #[test]
    fn test_derive_address() {
        derive_address("mint-x").unwrap();
        assert!(derive_address("").is_err());
    }
}
