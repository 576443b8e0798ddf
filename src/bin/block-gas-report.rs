//! `block-gas-report`: big vs small block statistics for recent HyperEVM blocks.

use clap::Parser;

use big_blocks::blocks::scanner::{DEFAULT_EVM_RPC_URL, DEFAULT_RPC_TIMEOUT_SECS};
use big_blocks::blocks::{BlockScanner, GasLimitSummary};
use big_blocks::config::{DEFAULT_ENV_FILE, RPC_URL_ENV_VAR};
use big_blocks::observability::{init_logging, logging::DEFAULT_FILTER};

#[derive(Parser)]
#[command(name = "block-gas-report")]
#[command(about = "Classify recent HyperEVM blocks as big (slow) or small (fast)", long_about = None)]
struct Cli {
    /// HyperEVM JSON-RPC endpoint
    #[arg(long, env = RPC_URL_ENV_VAR, default_value = DEFAULT_EVM_RPC_URL)]
    rpc_url: String,

    /// Number of recent blocks to summarize
    #[arg(long, default_value_t = 30)]
    window: u64,

    /// How far back to look for the latest big block
    #[arg(long, default_value_t = 100)]
    search_depth: u64,

    /// Per-call RPC timeout in seconds
    #[arg(long, default_value_t = DEFAULT_RPC_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_filename(DEFAULT_ENV_FILE).ok();
    let cli = Cli::parse();

    init_logging(DEFAULT_FILTER);

    let scanner = BlockScanner::new(&cli.rpc_url, cli.timeout_secs)?;

    let latest = scanner.latest_block().await?;
    println!(
        "Latest block {}: gas limit {} - {} ({})",
        latest.number,
        latest.gas_limit,
        latest.kind(),
        latest.time_iso8601()
    );
    println!("------------------------------");

    println!("Looking for a big block in the last {} blocks...", cli.search_depth);
    match scanner.find_recent_big_block(cli.search_depth).await? {
        Some(block) => println!(
            "Big block found! Block {}: gas limit {} (time {})",
            block.number,
            block.gas_limit,
            block.time_iso8601()
        ),
        None => println!("No big block in the last {} blocks.", cli.search_depth),
    }
    println!("------------------------------");

    println!("Analyzing the last {} blocks...", cli.window);
    let blocks = scanner.sample(cli.window).await?;
    for block in &blocks {
        println!(
            "Block {}: gas limit {} - {} ({})",
            block.number,
            block.gas_limit,
            block.kind(),
            block.time_iso8601()
        );
    }

    let summary = GasLimitSummary::from_blocks(&blocks);
    println!();
    println!(
        "Last {} blocks: {} big, {} small",
        summary.total(),
        summary.big,
        summary.small
    );
    println!("Ratio: {:.2}% big blocks", summary.big_ratio_percent());
    println!();
    println!("Dual-pool total time: {} seconds", summary.dual_pool_secs());
    println!("Single-pool estimated time: {} seconds", summary.single_pool_secs());
    println!("Time advantage: {:.2}%", summary.dual_pool_advantage_percent());

    Ok(())
}
