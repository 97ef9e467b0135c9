use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

/// 用户记录缓存的底层键值操作
#[async_trait]
pub trait UserCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, redis::RedisError>;

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: &str) -> Result<(), redis::RedisError>;

    async fn delete(&self, key: &str) -> Result<(), redis::RedisError>;
}

/// 基于 Redis 的用户缓存
#[derive(Clone)]
pub struct UserCacheOperations {
    redis: Arc<RedisClient>,
}

impl UserCacheOperations {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl UserCache for UserCacheOperations {
    async fn get(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        conn.get(key).await
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
