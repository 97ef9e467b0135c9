// 缓存操作

pub mod user;

pub use user::{UserCache, UserCacheOperations};
