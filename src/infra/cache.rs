//! Redis cache implementation.
//!
//! Provides the Redis-backed pieces the application actually leans on:
//! rate-limit counters, idempotency markers, and a distributed lock.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    Config, CACHE_PREFIX_LOCK, CACHE_PREFIX_RATE_LIMIT, DEFAULT_LOCK_TTL_SECONDS,
};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self { connection }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self { connection })
    }

    /// Set a key only if it does not already exist (SET NX EX).
    ///
    /// Returns true if the key was set, false if it was already present.
    /// Used for idempotency markers such as spike-alert dedupe keys.
    pub async fn set_nx_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<bool> {
        let mut conn = self.connection.clone();

        let set: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        Ok(set.is_some())
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    /// Check and increment rate limit counter.
    /// Returns (current_count, is_allowed) tuple.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            // First request in window
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }

    /// Try to acquire a distributed lock without retrying.
    /// Returns None if the lock is already held.
    pub async fn try_acquire_lock(&self, resource: &str) -> AppResult<Option<LockGuard>> {
        let key = format!("{}{}", CACHE_PREFIX_LOCK, resource);
        let lock_id = Uuid::new_v4().to_string();
        let mut conn = self.connection.clone();

        // SET NX: only one holder at a time
        let acquired: bool = redis::cmd("SET")
            .arg(&key)
            .arg(&lock_id)
            .arg("NX")
            .arg("EX")
            .arg(DEFAULT_LOCK_TTL_SECONDS)
            .query_async(&mut conn)
            .await
            .map(|r: Option<String>| r.is_some())
            .unwrap_or(false);

        if acquired {
            tracing::debug!(resource = %resource, lock_id = %lock_id, "Lock acquired");
            Ok(Some(LockGuard {
                cache: Arc::new(self.clone()),
                key,
                lock_id,
                released: false,
            }))
        } else {
            Ok(None)
        }
    }

    /// Release a lock (internal use - prefer using LockGuard).
    async fn release_lock(&self, key: &str, lock_id: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();

        // Atomically check-and-delete: only the owner may release
        let script = r#"
            if redis.call("GET", KEYS[1]) == ARGV[1] then
                return redis.call("DEL", KEYS[1])
            else
                return 0
            end
        "#;

        let released: i32 = redis::cmd("EVAL")
            .arg(script)
            .arg(1)
            .arg(key)
            .arg(lock_id)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        Ok(released == 1)
    }
}

// =============================================================================
// Lock Guard (RAII)
// =============================================================================

/// RAII guard for distributed locks.
/// Automatically releases the lock when dropped.
pub struct LockGuard {
    cache: Arc<Cache>,
    key: String,
    lock_id: String,
    released: bool,
}

impl LockGuard {
    /// Manually release the lock early.
    pub async fn release(mut self) -> AppResult<()> {
        self.do_release().await
    }

    async fn do_release(&mut self) -> AppResult<()> {
        if !self.released {
            self.released = true;
            let released = self.cache.release_lock(&self.key, &self.lock_id).await?;
            if released {
                tracing::debug!(key = %self.key, "Lock released");
            }
        }
        Ok(())
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released {
            let cache = self.cache.clone();
            let key = self.key.clone();
            let lock_id = self.lock_id.clone();

            // Release asynchronously since Drop cannot await
            tokio::spawn(async move {
                if let Err(e) = cache.release_lock(&key, &lock_id).await {
                    tracing::error!(key = %key, error = %e, "Failed to release lock on drop");
                } else {
                    tracing::debug!(key = %key, "Lock released on drop");
                }
            });
        }
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}
