use std::str::FromStr;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// StoreBackend
// ---------------------------------------------------------------------------

/// Where readings are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow::anyhow!("unknown store backend: {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Used by the `Postgres` backend. When absent or malformed the store
    /// routes fail but the server still starts.
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub db_max_connections: u32,
    /// How long a request waits for a pooled connection before failing.
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let store_backend = optional("STORE_BACKEND", "postgres")
            .trim()
            .parse::<StoreBackend>()
            .context("STORE_BACKEND must be 'postgres' or 'memory'")?;

        // Checked when the store is opened; a bad URL must not stop the server.
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        Ok(Self {
            store_backend,
            database_url,
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("PORT", "3000")
                .parse()
                .context("PORT must be a valid port number")?,
            db_max_connections: optional("DB_MAX_CONNECTIONS", "10")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            db_acquire_timeout_secs: optional("DB_ACQUIRE_TIMEOUT_SECS", "5")
                .parse()
                .context("DB_ACQUIRE_TIMEOUT_SECS must be a positive integer")?,
        })
    }
}
