use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Where the session's three keys are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    File { dir: PathBuf },
    Redis { url: String },
    Memory,
}

/// Application configuration loaded from environment variables.
/// Every variable is optional except `REDIS_URL` when the redis backend is selected.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub store: StoreBackend,
    pub store_key_prefix: String,
    /// Unset means PDF export falls back to browser printing.
    pub rasterizer_url: Option<String>,
    pub rasterizer_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store = match optional_env("STORE_BACKEND").as_deref().unwrap_or("file") {
            "file" => StoreBackend::File {
                dir: PathBuf::from(optional_env("DATA_DIR").unwrap_or_else(|| "./data".to_string())),
            },
            "redis" => StoreBackend::Redis {
                url: require_env("REDIS_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => bail!("STORE_BACKEND must be one of file, redis, memory (got '{other}')"),
        };

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            store,
            store_key_prefix: optional_env("STORE_KEY_PREFIX").unwrap_or_else(|| "folio:".to_string()),
            rasterizer_url: optional_env("RASTERIZER_URL"),
            rasterizer_timeout: Duration::from_secs(
                optional_env("RASTERIZER_TIMEOUT_SECS")
                    .unwrap_or_else(|| "60".to_string())
                    .parse::<u64>()
                    .context("RASTERIZER_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
