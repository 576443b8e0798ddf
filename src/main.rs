//! `big-blocks`: enable or disable Big Blocks mode for a Hyperliquid account.
//!
//! ```bash
//! big-blocks true                      # enable, .env.nft in the working dir
//! big-blocks false --env-file .env     # disable, custom env file
//! ```
//!
//! A rejected action is reported and the process still exits with status 0.
//! Missing configuration, signing failures and transport errors exit non-zero.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use big_blocks::app::{self, parse_bool_flag};
use big_blocks::config::{Config, DEFAULT_ENV_FILE};
use big_blocks::exchange::ExchangeClient;
use big_blocks::observability::{init_logging, logging::DEFAULT_FILTER};

#[derive(Parser)]
#[command(name = "big-blocks")]
#[command(about = "Enable or disable Big Blocks mode for a Hyperliquid account", long_about = None)]
struct Cli {
    /// Big Blocks mode value (true/false)
    #[arg(value_name = "usingBigBlocks", action = ArgAction::Set, required = true, value_parser = parse_bool_flag)]
    using_big_blocks: bool,

    /// Env file read before PRIVATE_KEY and RPC_URL are resolved
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(DEFAULT_FILTER);

    let config = Config::load(Some(cli.env_file.as_path()))?;
    tracing::debug!(config = ?config, "Configuration loaded");

    let client = ExchangeClient::new();
    let mut stdout = std::io::stdout();
    app::toggle_big_blocks(&config, &client, cli.using_big_blocks, &mut stdout).await?;

    Ok(())
}
