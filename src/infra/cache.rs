//! Redis cache.
//!
//! JSON-encoded values with a default TTL, read-through helpers for the
//! entities served by id, and the counters behind rate limiting.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{
    Config, CACHE_PREFIX_CLIENT, CACHE_PREFIX_ORDER, CACHE_PREFIX_PRODUCT,
    CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_USER, DEFAULT_CACHE_TTL_SECONDS,
};
use crate::domain::{Client as StoreClient, Order, OrderId, Product, UserResponse};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with a shared multiplexed connection.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

/// `{prefix}{id}`
pub fn cache_key(prefix: &str, id: impl std::fmt::Display) -> String {
    format!("{}{}", prefix, id)
}

impl Cache {
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        })
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }

    // =========================================================================
    // Entity Cache Operations
    // =========================================================================

    pub async fn get_order(&self, id: &OrderId) -> AppResult<Option<Order>> {
        self.get(&cache_key(CACHE_PREFIX_ORDER, id)).await
    }

    pub async fn set_order(&self, order: &Order) -> AppResult<()> {
        self.set(&cache_key(CACHE_PREFIX_ORDER, &order.id), order).await
    }

    pub async fn invalidate_order(&self, id: &OrderId) -> AppResult<()> {
        self.delete(&cache_key(CACHE_PREFIX_ORDER, id)).await
    }

    pub async fn get_product(&self, id: &uuid::Uuid) -> AppResult<Option<Product>> {
        self.get(&cache_key(CACHE_PREFIX_PRODUCT, id)).await
    }

    pub async fn set_product(&self, product: &Product) -> AppResult<()> {
        self.set(&cache_key(CACHE_PREFIX_PRODUCT, product.id), product)
            .await
    }

    pub async fn invalidate_product(&self, id: &uuid::Uuid) -> AppResult<()> {
        self.delete(&cache_key(CACHE_PREFIX_PRODUCT, id)).await
    }

    pub async fn get_client(&self, id: i64) -> AppResult<Option<StoreClient>> {
        self.get(&cache_key(CACHE_PREFIX_CLIENT, id)).await
    }

    pub async fn set_client(&self, client: &StoreClient) -> AppResult<()> {
        self.set(&cache_key(CACHE_PREFIX_CLIENT, client.id), client)
            .await
    }

    pub async fn invalidate_client(&self, id: i64) -> AppResult<()> {
        self.delete(&cache_key(CACHE_PREFIX_CLIENT, id)).await
    }

    pub async fn get_user(&self, user_id: &uuid::Uuid) -> AppResult<Option<UserResponse>> {
        self.get(&cache_key(CACHE_PREFIX_USER, user_id)).await
    }

    pub async fn set_user(&self, user: &UserResponse) -> AppResult<()> {
        self.set(&cache_key(CACHE_PREFIX_USER, user.id), user).await
    }

    pub async fn invalidate_user(&self, user_id: &uuid::Uuid) -> AppResult<()> {
        self.delete(&cache_key(CACHE_PREFIX_USER, user_id)).await
    }

    // =========================================================================
    // Rate Limiting Operations
    // =========================================================================

    /// Count one request against `identifier`'s window.
    /// Returns (current_count, is_allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = cache_key(CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        if count == 1 {
            let _: () = conn
                .expire(&key, window_seconds as i64)
                .await
                .map_err(cache_error)?;
        }

        let count = count.max(0) as u64;
        Ok((count, count <= max_requests))
    }
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        let id = OrderId::parse("6536518de9b0d305f193b5ef").unwrap();
        assert_eq!(
            cache_key(CACHE_PREFIX_ORDER, &id),
            "order:6536518de9b0d305f193b5ef"
        );
        assert_eq!(cache_key(CACHE_PREFIX_CLIENT, 7), "client:7");
        assert_eq!(cache_key(CACHE_PREFIX_RATE_LIMIT, "auth:1.2.3.4"), "rate_limit:auth:1.2.3.4");
    }
}
