//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::AliasLists;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache storing alias collections as JSON strings.
///
/// Uses `ConnectionManager` for connection reuse. All operations are
/// fail-open: errors are logged but never propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "aliases:".to_string(),
        })
    }

    fn build_key(&self, user_id: i64) -> String {
        format!("{}{}", self.key_prefix, user_id)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_aliases(&self, user_id: i64) -> CacheResult<Option<AliasLists>> {
        let key = self.build_key(user_id);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<AliasLists>(&raw) {
                Ok(aliases) => {
                    debug!(user_id, "Cache HIT");
                    Ok(Some(aliases))
                }
                Err(e) => {
                    warn!(user_id, error = %e, "Undecodable cache entry, treating as miss");
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!(user_id, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(user_id, error = %e, "Redis GET error");
                Ok(None)
            }
        }
    }

    async fn set_aliases(
        &self,
        user_id: i64,
        aliases: &AliasLists,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(user_id);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        let raw = serde_json::to_string(aliases)
            .map_err(|e| CacheError::OperationError(format!("Serialize failed: {}", e)))?;

        match conn.set_ex::<_, _, ()>(&key, raw, ttl).await {
            Ok(_) => {
                debug!(user_id, ttl, "Cache SET");
                Ok(())
            }
            Err(e) => {
                warn!(user_id, error = %e, "Redis SET error");
                Ok(())
            }
        }
    }

    async fn invalidate_aliases(&self, user_id: i64) -> CacheResult<()> {
        let key = self.build_key(user_id);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!(user_id, "Cache INVALIDATE");
                }
                Ok(())
            }
            Err(e) => {
                warn!(user_id, error = %e, "Redis DEL error");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
