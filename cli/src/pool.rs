//! Pool lifecycle commands

use anyhow::{Context, Result};
use colored::Colorize;
use cpamm_pool::{Address, Pool, PoolConfig, PoolError};

use crate::{config::CliConfig, store::Store};

/// Price display scale for `show`
const PRICE_SCALE: u64 = 1_000_000;

/// Ledger account holding a pool's reserves, derived from its seed
pub fn vault_address(seed: u64) -> Address {
    Address::from_label(&format!("cpamm-vault-{}", seed))
}

#[allow(clippy::too_many_arguments)]
pub fn initialize_pool(
    config: &CliConfig,
    store: &mut Store,
    seed: u64,
    fee_bps: Option<u16>,
    asset_x: Address,
    asset_y: Address,
    share_asset: Address,
    authority: Option<Address>,
) -> Result<()> {
    println!("{}", "=== Initialize Pool ===".bright_green().bold());

    let pool_config = PoolConfig {
        seed,
        fee_bps: fee_bps.unwrap_or(config.default_fee_bps),
        asset_x,
        asset_y,
        share_asset,
        vault: vault_address(seed),
        authority: Some(authority.unwrap_or(config.caller)),
        locked: false,
    };

    let pool = store
        .registry
        .initialize(pool_config)
        .with_context(|| format!("Failed to initialize pool {}", seed))?;

    print_config(pool);
    println!("\n{}", "Pool initialized".bright_green());
    Ok(())
}

pub fn set_lock(config: &CliConfig, store: &mut Store, seed: u64, locked: bool) -> Result<()> {
    let title = if locked { "=== Lock Pool ===" } else { "=== Unlock Pool ===" };
    println!("{}", title.bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), seed);
    println!("{} {}", "Caller:".bright_cyan(), config.caller);

    store
        .registry
        .set_locked(seed, &config.caller, locked)
        .with_context(|| format!("Failed to change lock on pool {}", seed))?;

    let status = if locked { "locked".yellow() } else { "unlocked".bright_green() };
    println!("\n{} {}", "Pool is now".bright_green(), status);
    Ok(())
}

pub fn show_pool(store: &Store, seed: u64) -> Result<()> {
    let pool = store.registry.pool(seed)?;

    println!("{}", "=== Pool ===".bright_green().bold());
    print_config(pool);

    let state = pool.state;
    println!("\n{}", "Reserves:".bright_yellow());
    println!("  {} {}", "X:".bright_cyan(), state.reserve_x);
    println!("  {} {}", "Y:".bright_cyan(), state.reserve_y);
    println!("  {} {}", "Shares:".bright_cyan(), state.total_shares);
    println!("  {} {}", "Invariant (x·y):".bright_cyan(), state.invariant());

    if state.is_empty() {
        println!("\n{}", "Pool is empty; the next deposit sets the price".dimmed());
        return Ok(());
    }

    let y_per_x = amm_model::spot_price(state.reserve_x, state.reserve_y, PRICE_SCALE)
        .map_err(PoolError::from)?;
    let x_per_y = amm_model::spot_price(state.reserve_y, state.reserve_x, PRICE_SCALE)
        .map_err(PoolError::from)?;
    println!("\n{}", "Spot price:".bright_yellow());
    println!("  {} {}", "Y per X:".bright_cyan(), format_scaled(y_per_x));
    println!("  {} {}", "X per Y:".bright_cyan(), format_scaled(x_per_y));
    Ok(())
}

pub fn list_pools(store: &Store) -> Result<()> {
    println!("{}", "=== Pools ===".bright_green().bold());

    if store.registry.is_empty() {
        println!("\n{}", "No pools found".dimmed());
        return Ok(());
    }

    for pool in store.registry.pools() {
        let status = if pool.config.locked { " [locked]".yellow() } else { "".normal() };
        println!(
            "  {} {:<20} {} {:>5} bps  x={} y={} shares={}{}",
            "├─".dimmed(),
            pool.seed(),
            "fee".dimmed(),
            pool.config.fee_bps,
            pool.state.reserve_x,
            pool.state.reserve_y,
            pool.state.total_shares,
            status,
        );
    }
    println!("\n{} {}", "Total:".bright_cyan(), store.registry.len());
    Ok(())
}

fn print_config(pool: &Pool) {
    let cfg = &pool.config;
    println!("{} {}", "Seed:".bright_cyan(), cfg.seed);
    println!("{} {} bps", "Fee:".bright_cyan(), cfg.fee_bps);
    println!("{} {}", "Asset X:".bright_cyan(), cfg.asset_x);
    println!("{} {}", "Asset Y:".bright_cyan(), cfg.asset_y);
    println!("{} {}", "Share asset:".bright_cyan(), cfg.share_asset);
    println!("{} {}", "Vault:".bright_cyan(), cfg.vault);
    match cfg.authority {
        Some(authority) => println!("{} {}", "Authority:".bright_cyan(), authority),
        None => println!("{} {}", "Authority:".bright_cyan(), "none".dimmed()),
    }
    println!(
        "{} {}",
        "Locked:".bright_cyan(),
        if cfg.locked { "Yes" } else { "No" }
    );
}

fn format_scaled(value: u64) -> String {
    format!("{}.{:06}", value / PRICE_SCALE, value % PRICE_SCALE)
}
