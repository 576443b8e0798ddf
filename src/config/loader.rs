//! Configuration loading from the environment.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Dotenv file read before resolving variables.
pub const DEFAULT_ENV_FILE: &str = ".env.nft";

/// Environment variable holding the account's private key (hex, no `0x`).
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Environment variable holding the HyperEVM RPC URL.
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PRIVATE_KEY not found; check your .env.nft file or environment")]
    MissingPrivateKey,
}

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// Account private key. Never printed in full.
    pub private_key: String,
    /// RPC URL; only consulted for network selection. Empty when unset.
    pub rpc_url: String,
}

impl Config {
    /// Load `env_file` (if any) into the process environment, then resolve.
    ///
    /// A missing file is not an error. Variables already set in the
    /// environment take precedence over the file.
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = env_file {
            match dotenvy::from_path(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "Loaded env file"),
                Err(e) if e.not_found() => {
                    tracing::debug!(path = %path.display(), "Env file not found, using process environment")
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable env file"),
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let private_key = lookup(PRIVATE_KEY_ENV_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingPrivateKey)?;

        let rpc_url = lookup(RPC_URL_ENV_VAR).unwrap_or_default();

        Ok(Self { private_key, rpc_url })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("private_key", &mask_secret(&self.private_key))
            .field("rpc_url", &self.rpc_url)
            .finish()
    }
}

/// Render a secret as its first and last four characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
