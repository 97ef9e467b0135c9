// 数据库模块
// 包含数据库实体定义和存储库操作

pub mod error;
pub mod models; // 数据库实体定义
pub mod repositories; // 存储库实现

pub use error::StoreError;
pub use repositories::user::{UserRepository, UserStore};
