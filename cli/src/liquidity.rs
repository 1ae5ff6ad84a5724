//! Liquidity provider operations

use anyhow::{Context, Result};
use colored::Colorize;
use cpamm_pool::TokenLedger;

use crate::{config::CliConfig, store::Store};

pub fn add_liquidity(
    config: &CliConfig,
    store: &mut Store,
    seed: u64,
    shares: u64,
    max_x: u64,
    max_y: u64,
) -> Result<()> {
    println!("{}", "=== Add Liquidity ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), seed);
    println!("{} {}", "Shares:".bright_cyan(), shares);
    println!("{} {} / {}", "Max X / Y:".bright_cyan(), max_x, max_y);

    let deposited = store
        .registry
        .deposit(seed, &config.caller, &mut store.ledger, shares, max_x, max_y)
        .with_context(|| format!("Deposit into pool {} failed", seed))?;

    println!("\n{}", "Deposited:".bright_yellow());
    println!("  {} {}", "X:".bright_cyan(), deposited.x);
    println!("  {} {}", "Y:".bright_cyan(), deposited.y);
    println!("  {} {}", "Shares minted:".bright_cyan(), deposited.shares);
    print_position(config, store, seed)
}

pub fn remove_liquidity(
    config: &CliConfig,
    store: &mut Store,
    seed: u64,
    shares: u64,
    min_x: u64,
    min_y: u64,
) -> Result<()> {
    println!("{}", "=== Remove Liquidity ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), seed);
    println!("{} {}", "Shares:".bright_cyan(), shares);
    println!("{} {} / {}", "Min X / Y:".bright_cyan(), min_x, min_y);

    let withdrawn = store
        .registry
        .withdraw(seed, &config.caller, &mut store.ledger, shares, min_x, min_y)
        .with_context(|| format!("Withdrawal from pool {} failed", seed))?;

    println!("\n{}", "Withdrawn:".bright_yellow());
    println!("  {} {}", "X:".bright_cyan(), withdrawn.x);
    println!("  {} {}", "Y:".bright_cyan(), withdrawn.y);
    print_position(config, store, seed)
}

fn print_position(config: &CliConfig, store: &Store, seed: u64) -> Result<()> {
    let pool = store.registry.pool(seed)?;
    let held = store.ledger.balance(&pool.config.share_asset, &config.caller);
    println!(
        "\n{} {} of {}",
        "Your shares:".bright_cyan(),
        held,
        pool.state.total_shares
    );
    Ok(())
}
