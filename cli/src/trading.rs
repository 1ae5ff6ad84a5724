//! Swap execution

use anyhow::{Context, Result};
use colored::Colorize;
use cpamm_pool::SwapDirection;

use crate::{config::CliConfig, store::Store};

pub fn execute_swap(
    config: &CliConfig,
    store: &mut Store,
    seed: u64,
    direction: SwapDirection,
    amount_in: u64,
    min_out: u64,
) -> Result<()> {
    println!("{}", "=== Swap ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), seed);
    println!("{} {}", "Direction:".bright_cyan(), direction);
    println!("{} {}", "Amount in:".bright_cyan(), amount_in);
    println!("{} {}", "Min out:".bright_cyan(), min_out);

    let quote = store
        .registry
        .swap(seed, &config.caller, &mut store.ledger, direction, amount_in, min_out)
        .with_context(|| format!("Swap on pool {} failed", seed))?;

    println!("\n{}", "Filled:".bright_yellow());
    println!("  {} {}", "Paid:".bright_cyan(), quote.amount_in);
    println!("  {} {}", "Fee:".bright_cyan(), quote.fee);
    println!("  {} {}", "Received:".bright_cyan(), quote.amount_out.to_string().bright_green());

    let state = store.registry.pool(seed)?.state;
    println!(
        "\n{} x={} y={}",
        "Reserves:".bright_cyan(),
        state.reserve_x,
        state.reserve_y
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::initialize_pool;
    use cpamm_pool::{Address, TokenLedger};

    const M: u64 = 1_000_000;

    #[test]
    fn test_swap_reference_pool() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            state_dir: dir.path().to_path_buf(),
            caller: Address::from_label("trader"),
            default_fee_bps: 30,
        };
        let (x, y) = (Address::from_label("x"), Address::from_label("y"));

        let mut store = Store::open(dir.path()).unwrap();
        initialize_pool(&config, &mut store, 5, None, x, y, Address::from_label("lp"), None).unwrap();
        store.ledger.credit(x, config.caller, 200 * M).unwrap();
        store.ledger.credit(y, config.caller, 200 * M).unwrap();
        store
            .registry
            .deposit(5, &config.caller, &mut store.ledger, 150 * M, 150 * M, 150 * M)
            .unwrap();

        execute_swap(&config, &mut store, 5, SwapDirection::XtoY, 10 * M, 1).unwrap();
        assert_eq!(store.ledger.balance(&y, &config.caller), 50 * M + 9_348_627);

        let err = execute_swap(&config, &mut store, 5, SwapDirection::YtoX, 10 * M, 100 * M)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("slippage"));
    }
}
