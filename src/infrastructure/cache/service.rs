//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

use crate::domain::entities::AliasLists;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching each user's alias collections.
///
/// Implementations must be thread-safe and fail open: a broken cache degrades
/// to database reads, it never fails a request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached alias collections of a user.
    ///
    /// Returns `Ok(None)` on miss, on error, or on an undecodable entry.
    async fn get_aliases(&self, user_id: i64) -> CacheResult<Option<AliasLists>>;

    /// Stores a user's alias collections with optional TTL.
    ///
    /// `ttl_seconds = None` uses the implementation default.
    async fn set_aliases(
        &self,
        user_id: i64,
        aliases: &AliasLists,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Drops a user's cached alias collections.
    ///
    /// Called after any alias create/update/delete.
    async fn invalidate_aliases(&self, user_id: i64) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
