//! Big/small block classification and window statistics.

use std::fmt;

use chrono::{DateTime, SecondsFormat};

/// Gas limit above which a block is a big (slow) block.
pub const BIG_BLOCK_GAS_THRESHOLD: u64 = 2_000_000;

/// Nominal interval between big blocks, in seconds.
pub const BIG_BLOCK_INTERVAL_SECS: f64 = 60.0;

/// Nominal interval between small blocks, in seconds.
pub const SMALL_BLOCK_INTERVAL_SECS: f64 = 2.0;

/// Which block pool a block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Big,
    Small,
}

impl BlockKind {
    pub fn classify(gas_limit: u64) -> Self {
        if gas_limit > BIG_BLOCK_GAS_THRESHOLD {
            BlockKind::Big
        } else {
            BlockKind::Small
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Big => f.write_str("BIG (Slow) Block"),
            BlockKind::Small => f.write_str("SMALL (Fast) Block"),
        }
    }
}

/// Gas-relevant fields of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGas {
    pub number: u64,
    pub gas_limit: u64,
    /// Unix seconds.
    pub timestamp: u64,
}

impl BlockGas {
    pub fn kind(&self) -> BlockKind {
        BlockKind::classify(self.gas_limit)
    }

    /// Block time as ISO-8601 UTC.
    pub fn time_iso8601(&self) -> String {
        format_unix_timestamp(self.timestamp)
    }
}

/// Format Unix seconds as ISO-8601 UTC, e.g. `2023-11-14T22:13:20Z`.
///
/// Values outside chrono's range fall back to the raw number.
pub fn format_unix_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| secs.to_string())
}

/// Counts over a window of blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasLimitSummary {
    pub big: u64,
    pub small: u64,
}

impl GasLimitSummary {
    pub fn from_blocks<'a, I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = &'a BlockGas>,
    {
        blocks.into_iter().fold(Self::default(), |mut acc, block| {
            match block.kind() {
                BlockKind::Big => acc.big += 1,
                BlockKind::Small => acc.small += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> u64 {
        self.big + self.small
    }

    /// Share of big blocks, in percent. Zero for an empty window.
    pub fn big_ratio_percent(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.big as f64 / self.total() as f64 * 100.0
    }

    /// Time to produce the window with separate big and small pools.
    pub fn dual_pool_secs(&self) -> f64 {
        self.big as f64 * BIG_BLOCK_INTERVAL_SECS + self.small as f64 * SMALL_BLOCK_INTERVAL_SECS
    }

    /// Estimated time with a single pool at the average interval.
    pub fn single_pool_secs(&self) -> f64 {
        self.total() as f64 * ((BIG_BLOCK_INTERVAL_SECS + SMALL_BLOCK_INTERVAL_SECS) / 2.0)
    }

    /// Time saved by the dual pool, in percent. Zero for an empty window.
    pub fn dual_pool_advantage_percent(&self) -> f64 {
        let single = self.single_pool_secs();
        if single == 0.0 {
            return 0.0;
        }
        (single - self.dual_pool_secs()) / single * 100.0
    }
}
