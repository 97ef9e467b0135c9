#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use user_service::cache::UserCache;
use user_service::database::{StoreError, UserStore};
use user_service::models::{NewUser, User, UserChanges, UserFilters};
use user_service::services::UserService;

/// 内存版用户存储，created_at 随 ID 递增
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<BTreeMap<i32, User>>,
    next_id: AtomicUsize,
    pub find_calls: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Other(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: &NewUser) -> Result<User, StoreError> {
        self.check_writable()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict {
                field: "email".into(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
        let user = User {
            id,
            name: data.name.clone(),
            email: data.email.clone(),
            gender: data.gender,
            role: data.role.unwrap_or_default(),
            created_at: Utc.timestamp_opt(1_700_000_000 + id as i64, 0).unwrap(),
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_many(
        &self,
        filters: &UserFilters,
        skip: i64,
        take: i64,
    ) -> Result<Vec<User>, StoreError> {
        let users = self.users.lock().unwrap();
        let mut matching: Vec<User> = users.values().filter(|u| filters.matches(u)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect())
    }

    async fn count(&self, filters: &UserFilters) -> Result<u64, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().filter(|u| filters.matches(u)).count() as u64)
    }

    async fn update(&self, id: i32, data: &UserChanges) -> Result<User, StoreError> {
        self.check_writable()?;
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &data.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict {
                    field: "email".into(),
                });
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = &data.name {
            user.name = name.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.clone();
        }
        if data.gender.is_some() {
            user.gender = data.gender;
        }
        if let Some(role) = data.role {
            user.role = role;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.check_writable()?;
        match self.users.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}

/// 内存版缓存，可以模拟 Redis 不可用
pub struct MemoryUserCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    pub available: AtomicBool,
    pub sets: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl Default for MemoryUserCache {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            sets: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }
}

impl MemoryUserCache {
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .is_some_and(|(_, expires)| Instant::now() < *expires)
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            (value.to_string(), Instant::now() + Duration::from_secs(3600)),
        );
    }

    fn check_available(&self) -> Result<(), redis::RedisError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection refused",
            )))
        }
    }
}

#[async_trait]
impl UserCache for MemoryUserCache {
    async fn get(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        self.check_available()?;
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(key)
            .filter(|(_, expires)| Instant::now() < *expires)
            .map(|(value, _)| value.clone()))
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: &str) -> Result<(), redis::RedisError> {
        self.check_available()?;
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().insert(
            key.to_string(),
            (value.to_string(), Instant::now() + Duration::from_secs(ttl_secs)),
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), redis::RedisError> {
        self.check_available()?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

pub struct Harness {
    pub store: Arc<MemoryUserStore>,
    pub cache: Arc<MemoryUserCache>,
    pub service: UserService,
}

pub fn harness() -> Harness {
    let store = Arc::new(MemoryUserStore::default());
    let cache = Arc::new(MemoryUserCache::default());
    let service = UserService::new(store.clone(), cache.clone(), Duration::from_secs(3600));
    Harness {
        store,
        cache,
        service,
    }
}

pub fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.into(),
        email: email.into(),
        gender: None,
        role: None,
    }
}
