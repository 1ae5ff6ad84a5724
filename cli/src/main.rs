//! cpamm CLI - drive constant-product pools against a local ledger
//!
//! Pools and balances live in a state directory (`pools.bin` and
//! `ledger.json`). Every command loads them, and mutating commands write
//! them back once the operation succeeds.

use clap::{Parser, Subcommand};
use colored::Colorize;
use cpamm_pool::{Address, SwapDirection};
use std::path::PathBuf;

mod account;
mod config;
mod liquidity;
mod pool;
mod store;
mod trading;

use config::CliConfig;
use store::Store;

#[derive(Parser)]
#[command(name = "cpamm")]
#[command(about = "Constant-product AMM pools - create, provide liquidity and swap", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding pools.bin and ledger.json
    #[arg(short, long)]
    state_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Acting account (base58)
    #[arg(long)]
    caller: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty pool
    Init {
        /// Pool seed (distinguishes pools over the same pair)
        #[arg(long)]
        seed: u64,

        /// Swap fee in basis points (defaults to the configured fee)
        #[arg(long)]
        fee_bps: Option<u16>,

        /// Asset X address
        #[arg(long)]
        asset_x: Address,

        /// Asset Y address
        #[arg(long)]
        asset_y: Address,

        /// Liquidity share asset address
        #[arg(long)]
        share_asset: Address,

        /// Account allowed to lock the pool (defaults to the caller)
        #[arg(long)]
        authority: Option<Address>,
    },

    /// Add liquidity in exchange for shares
    Deposit {
        #[arg(long)]
        seed: u64,

        /// Shares to mint
        #[arg(long)]
        shares: u64,

        /// Most asset X to pay
        #[arg(long)]
        max_x: u64,

        /// Most asset Y to pay
        #[arg(long)]
        max_y: u64,
    },

    /// Burn shares for a proportional cut of the reserves
    Withdraw {
        #[arg(long)]
        seed: u64,

        /// Shares to burn
        #[arg(long)]
        shares: u64,

        /// Least asset X to receive
        #[arg(long, default_value = "0")]
        min_x: u64,

        /// Least asset Y to receive
        #[arg(long, default_value = "0")]
        min_y: u64,
    },

    /// Trade one pool asset for the other
    Swap {
        #[arg(long)]
        seed: u64,

        /// x-to-y or y-to-x
        #[arg(long)]
        direction: SwapDirection,

        /// Amount paid in, fee included
        #[arg(long)]
        amount_in: u64,

        /// Least output accepted
        #[arg(long, default_value = "1")]
        min_out: u64,
    },

    /// Halt deposits, withdrawals and swaps (authority only)
    Lock {
        #[arg(long)]
        seed: u64,
    },

    /// Resume a locked pool (authority only)
    Unlock {
        #[arg(long)]
        seed: u64,
    },

    /// Mint test funds into an account
    Faucet {
        /// Asset address
        #[arg(long)]
        asset: Address,

        #[arg(long)]
        amount: u64,

        /// Recipient (defaults to the caller)
        #[arg(long)]
        to: Option<Address>,
    },

    /// Show every balance of an account
    Balance {
        /// Account (defaults to the caller)
        #[arg(long)]
        owner: Option<Address>,
    },

    /// Show pool configuration, reserves and price
    Show {
        #[arg(long)]
        seed: u64,
    },

    /// List all pools
    List,

    /// Derive a deterministic address from a label
    #[command(name = "address")]
    DeriveAddress {
        name: String,
    },
}

impl Commands {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::Init { .. }
                | Commands::Deposit { .. }
                | Commands::Withdraw { .. }
                | Commands::Swap { .. }
                | Commands::Lock { .. }
                | Commands::Unlock { .. }
                | Commands::Faucet { .. }
        )
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Needs no state
    if let Commands::DeriveAddress { name } = &cli.command {
        return account::derive_address(name);
    }

    let config = CliConfig::load(cli.config.as_deref(), cli.state_dir.clone(), cli.caller.clone())?;

    if cli.verbose {
        println!("{} {}", "State dir:".bright_cyan(), config.state_dir.display());
        println!("{} {}", "Caller:".bright_cyan(), config.caller);
    }

    let mut store = Store::open(&config.state_dir)?;
    let mutates = cli.command.mutates();

    // Execute command
    match cli.command {
        Commands::Init { seed, fee_bps, asset_x, asset_y, share_asset, authority } => {
            pool::initialize_pool(&config, &mut store, seed, fee_bps, asset_x, asset_y, share_asset, authority)?;
        }
        Commands::Deposit { seed, shares, max_x, max_y } => {
            liquidity::add_liquidity(&config, &mut store, seed, shares, max_x, max_y)?;
        }
        Commands::Withdraw { seed, shares, min_x, min_y } => {
            liquidity::remove_liquidity(&config, &mut store, seed, shares, min_x, min_y)?;
        }
        Commands::Swap { seed, direction, amount_in, min_out } => {
            trading::execute_swap(&config, &mut store, seed, direction, amount_in, min_out)?;
        }
        Commands::Lock { seed } => {
            pool::set_lock(&config, &mut store, seed, true)?;
        }
        Commands::Unlock { seed } => {
            pool::set_lock(&config, &mut store, seed, false)?;
        }
        Commands::Faucet { asset, amount, to } => {
            account::faucet(&config, &mut store, asset, amount, to)?;
        }
        Commands::Balance { owner } => {
            account::show_balances(&config, &store, owner)?;
        }
        Commands::Show { seed } => {
            pool::show_pool(&store, seed)?;
        }
        Commands::List => {
            pool::list_pools(&store)?;
        }
        Commands::DeriveAddress { .. } => {}
    }

    if mutates {
        store.save()?;
    }

    Ok(())
}
