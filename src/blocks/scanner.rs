//! HyperEVM block scanner with per-call timeouts.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint
//! - Fetch block headers by number
//! - Walk back from the chain head looking for big blocks

use alloy::eips::BlockNumberOrTag;
use alloy::providers::{Provider, ProviderBuilder};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

use crate::blocks::summary::{BlockGas, BlockKind};

/// Public HyperEVM RPC endpoint.
pub const DEFAULT_EVM_RPC_URL: &str = "https://rpc.hyperliquid.xyz/evm";

/// Default per-call RPC timeout.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur while scanning blocks.
#[derive(Debug, Error)]
pub enum BlockError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node has no block at this height.
    #[error("Block {0} not found")]
    MissingBlock(u64),
}

/// Result type for block scanning.
pub type BlockResult<T> = Result<T, BlockError>;

/// Read-only block scanner over one RPC endpoint.
#[derive(Clone)]
pub struct BlockScanner {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    timeout_secs: u64,
}

impl BlockScanner {
    /// Create a scanner for `rpc_url`.
    ///
    /// No request is made until the first query.
    pub fn new(rpc_url: &str, timeout_secs: u64) -> BlockResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider = Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        tracing::info!(rpc_url = %rpc_url, timeout_secs = timeout_secs, "Block scanner initialized");

        Ok(Self {
            provider,
            rpc_url: rpc_url.to_string(),
            timeout_secs,
        })
    }

    fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the latest block number.
    pub async fn latest_block_number(&self) -> BlockResult<u64> {
        match timeout(self.timeout_duration(), self.provider.get_block_number()).await {
            Ok(Ok(number)) => Ok(number),
            Ok(Err(e)) => Err(BlockError::Rpc(e.to_string())),
            Err(_) => Err(BlockError::Timeout(self.timeout_secs)),
        }
    }

    /// Get the gas limit and timestamp of block `number`.
    pub async fn block_gas(&self, number: u64) -> BlockResult<BlockGas> {
        let fut = self.provider.get_block_by_number(BlockNumberOrTag::Number(number));
        let block = match timeout(self.timeout_duration(), fut).await {
            Ok(Ok(Some(block))) => block,
            Ok(Ok(None)) => return Err(BlockError::MissingBlock(number)),
            Ok(Err(e)) => return Err(BlockError::Rpc(e.to_string())),
            Err(_) => return Err(BlockError::Timeout(self.timeout_secs)),
        };

        Ok(BlockGas {
            number: block.header.number,
            gas_limit: block.header.gas_limit,
            timestamp: block.header.timestamp,
        })
    }

    /// Gas details of the chain head.
    pub async fn latest_block(&self) -> BlockResult<BlockGas> {
        let head = self.latest_block_number().await?;
        self.block_gas(head).await
    }

    /// Most recent big block within `depth` blocks of the head.
    pub async fn find_recent_big_block(&self, depth: u64) -> BlockResult<Option<BlockGas>> {
        let head = self.latest_block_number().await?;

        for number in window_numbers(head, depth) {
            let block = self.block_gas(number).await?;
            if block.kind() == BlockKind::Big {
                return Ok(Some(block));
            }
            tracing::debug!(block = number, gas_limit = block.gas_limit, "Small block");
        }

        Ok(None)
    }

    /// The last `window` blocks, newest first.
    pub async fn sample(&self, window: u64) -> BlockResult<Vec<BlockGas>> {
        let head = self.latest_block_number().await?;
        let mut blocks = Vec::new();
        for number in window_numbers(head, window) {
            blocks.push(self.block_gas(number).await?);
        }
        Ok(blocks)
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

impl std::fmt::Debug for BlockScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockScanner")
            .field("rpc_url", &self.rpc_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Block numbers from `head` back `count` blocks, newest first, never
/// including the genesis block.
fn window_numbers(head: u64, count: u64) -> impl Iterator<Item = u64> {
    (0..count).filter_map(move |i| head.checked_sub(i)).filter(|n| *n > 0)
}
