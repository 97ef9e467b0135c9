//! 用户记录的 cache-aside 访问层
//!
//! 数据库是唯一可信来源，Redis 只做加速：
//! - 读：先查缓存，未命中再查库并回填（回填失败只记日志）
//! - 写：先写库，库写成功后再删除缓存；库写失败则不动缓存
//! - 缓存从不原地更新，只会被删除，TTL 兜底任何漏掉的失效

use std::sync::Arc;
use std::time::Duration;

use crate::cache::keys::user_key;
use crate::cache::{CachedUser, UserCache};
use crate::database::UserStore;
use crate::error::AppError;
use crate::models::{NewUser, PageRequest, User, UserChanges, UserFilters, UserPage};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    cache: Arc<dyn UserCache>,
    cache_ttl: Duration,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn UserCache>, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
        }
    }

    /// 按 ID 读取用户，不存在时返回 `Ok(None)`
    pub async fn fetch(&self, id: i32) -> Result<Option<User>, AppError> {
        if let Some(user) = self.cached(id).await {
            tracing::info!("User {} retrieved from cache", id);
            return Ok(Some(user));
        }

        let user = self.store.find_by_id(id).await.map_err(|e| {
            tracing::error!("Error getting user by ID {}: {}", id, e);
            AppError::from(e)
        })?;

        if let Some(user) = &user {
            self.populate(user).await;
            tracing::info!("User {} retrieved from database and cached", id);
        }
        Ok(user)
    }

    /// 创建用户，只写库，下次读取时再进缓存
    pub async fn create(&self, data: NewUser) -> Result<User, AppError> {
        let user = self.store.create(&data).await.map_err(|e| {
            tracing::error!("Error creating user: {}", e);
            AppError::from(e)
        })?;

        tracing::info!("User created with ID: {}", user.id);
        Ok(user)
    }

    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<User, AppError> {
        let user = self.store.update(id, &changes).await.map_err(|e| {
            tracing::error!("Error updating user {}: {}", id, e);
            AppError::from(e)
        })?;

        // 库已确认写入，此时再失效缓存
        self.invalidate(id).await;

        tracing::info!("User {} updated", id);
        Ok(user)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.store.delete(id).await.map_err(|e| {
            tracing::error!("Error deleting user {}: {}", id, e);
            AppError::from(e)
        })?;

        self.invalidate(id).await;

        tracing::info!("User {} deleted", id);
        Ok(())
    }

    /// 过滤分页列表，不走缓存；总数与当前页并发查询
    pub async fn list(&self, filters: UserFilters, page: PageRequest) -> Result<UserPage, AppError> {
        let (total, users) = futures_util::try_join!(
            self.store.count(&filters),
            self.store.find_many(&filters, page.skip(), page.take()),
        )
        .map_err(|e| {
            tracing::error!("Error getting users: {}", e);
            AppError::from(e)
        })?;

        tracing::info!("Users list retrieved from database");
        Ok(UserPage {
            users,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    /// 缓存读取失败或内容无法解析都视为未命中
    async fn cached(&self, id: i32) -> Option<User> {
        let key = user_key(id);
        let raw = match self.cache.get(&key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Error getting cached user {}: {}", id, e);
                return None;
            }
        };

        match serde_json::from_str::<CachedUser>(&raw) {
            Ok(cached) => Some(cached.into()),
            Err(e) => {
                tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn populate(&self, user: &User) {
        let json = match serde_json::to_string(&CachedUser::from(user)) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize user {} for cache: {}", user.id, e);
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set_ex(&user_key(user.id), self.cache_ttl.as_secs(), &json)
            .await
        {
            tracing::warn!("Error caching user {}: {}", user.id, e);
        }
    }

    async fn invalidate(&self, id: i32) {
        if let Err(e) = self.cache.delete(&user_key(id)).await {
            tracing::warn!("Error removing cached user {}: {}", id, e);
        }
    }
}
