//! Persistence collaborator — a small key-value store behind a trait.
//!
//! Three logical keys are used: the serialized Document, the theme flag and the
//! onboarding flag. Reads happen once at startup; writes follow every mutation.

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;
pub mod redis_backend;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use redis_backend::RedisStore;

pub const DOCUMENT_KEY: &str = "resume_data";
pub const THEME_KEY: &str = "theme";
pub const ONBOARDING_KEY: &str = "onboarding_seen";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Swappable storage backend. Carried in `AppState` as `Arc<dyn KeyValueStore>`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
