use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Gender, Role, User};

/// 用户缓存数据模型
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CachedUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for CachedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            gender: user.gender,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<CachedUser> for User {
    fn from(cached: CachedUser) -> Self {
        Self {
            id: cached.id,
            name: cached.name,
            email: cached.email,
            gender: cached.gender,
            role: cached.role,
            created_at: cached.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn json_preserves_every_field() {
        let user = User {
            id: 9,
            name: "Grace".into(),
            email: "grace@example.com".into(),
            gender: Some(Gender::Female),
            role: Role::Moderator,
            created_at: Utc.timestamp_opt(1_700_000_000, 123_456_000).unwrap(),
        };

        let json = serde_json::to_string(&CachedUser::from(&user)).unwrap();
        let back: CachedUser = serde_json::from_str(&json).unwrap();
        assert_eq!(User::from(back), user);
    }
}
