//! Block gas inspection for the `block-gas-report` binary.
//!
//! # Data Flow
//! ```text
//! RPC URL
//!     → scanner.rs (header fetches with timeouts)
//!     → summary.rs (big/small classification, pool timing)
//! ```

pub mod scanner;
pub mod summary;

pub use scanner::{BlockError, BlockScanner};
pub use summary::{BlockGas, BlockKind, GasLimitSummary};
