use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::store::{KeyValueStore, StoreError};

/// Redis-backed store. Keys are namespaced with a prefix so several editor
/// instances can share one server.
pub struct RedisStore {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisStore {
    pub async fn connect(url: &str, prefix: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis store connected (prefix '{prefix}')");
        Ok(Self {
            conn,
            prefix: prefix.to_string(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        namespaced_key(&self.prefix, key)
    }
}

fn namespaced_key(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.namespaced(key), value).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DOCUMENT_KEY, THEME_KEY};

    #[test]
    fn test_keys_carry_prefix() {
        assert_eq!(namespaced_key("folio:", DOCUMENT_KEY), format!("folio:{DOCUMENT_KEY}"));
        assert_eq!(namespaced_key("", THEME_KEY), THEME_KEY);
        assert_ne!(
            namespaced_key("team-a:", DOCUMENT_KEY),
            namespaced_key("team-b:", DOCUMENT_KEY)
        );
    }

    #[tokio::test]
    async fn test_malformed_url_is_rejected_before_connecting() {
        let result = RedisStore::connect("not a redis url", "folio:").await;
        assert!(matches!(result, Err(StoreError::Redis(_))));
    }
}
