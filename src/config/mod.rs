//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! dotenv file (.env.nft by default)
//!     → process environment
//!     → loader.rs (resolve PRIVATE_KEY / RPC_URL)
//!     → Config (immutable, passed explicitly to app::run)
//! ```

pub mod loader;

pub use loader::{mask_secret, Config, ConfigError, DEFAULT_ENV_FILE, PRIVATE_KEY_ENV_VAR, RPC_URL_ENV_VAR};
