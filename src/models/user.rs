use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL.into_iter().find(|g| g.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Moderator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Moderator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Moderator => "moderator",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL.into_iter().find(|r| r.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 用户记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// 创建用户的数据（已校验）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
    pub role: Option<Role>,
}

/// 更新用户的数据（已校验，至少一个字段）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.gender.is_none() && self.role.is_none()
    }
}

/// 列表过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub gender: Option<Gender>,
    pub role: Option<Role>,
    /// 对 name 或 email 做不区分大小写的子串匹配
    pub search: Option<String>,
}

impl UserFilters {
    pub fn matches(&self, user: &User) -> bool {
        if self.gender.is_some() && user.gender != self.gender {
            return false;
        }
        if self.role.is_some_and(|role| user.role != role) {
            return false;
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                user.name.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn skip(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.limit as i64
    }

    pub fn take(&self) -> i64 {
        self.limit as i64
    }
}

/// 一页用户及过滤后的总数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str, gender: Option<Gender>, role: Role) -> User {
        User {
            id: 1,
            name: name.into(),
            email: email.into(),
            gender,
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn enums_round_trip_through_str() {
        for g in Gender::ALL {
            assert_eq!(g.as_str().parse::<Gender>(), Ok(g));
        }
        for r in Role::ALL {
            assert_eq!(r.as_str().parse::<Role>(), Ok(r));
        }
        assert!("Admin".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn search_is_case_insensitive_on_name_or_email() {
        let alice = user("Alice Smith", "alice@example.com", Some(Gender::Female), Role::User);
        let filters = UserFilters {
            search: Some("SMITH".into()),
            ..Default::default()
        };
        assert!(filters.matches(&alice));

        let filters = UserFilters {
            search: Some("EXAMPLE.COM".into()),
            ..Default::default()
        };
        assert!(filters.matches(&alice));

        let filters = UserFilters {
            search: Some("bob".into()),
            ..Default::default()
        };
        assert!(!filters.matches(&alice));
    }

    #[test]
    fn equality_filters() {
        let bob = user("Bob", "bob@example.com", None, Role::Admin);
        let by_gender = UserFilters {
            gender: Some(Gender::Male),
            ..Default::default()
        };
        assert!(!by_gender.matches(&bob));

        let by_role = UserFilters {
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert!(by_role.matches(&bob));
    }

    #[test]
    fn page_offsets() {
        let page = PageRequest { page: 2, limit: 10 };
        assert_eq!(page.skip(), 10);
        assert_eq!(page.take(), 10);
        assert_eq!(PageRequest::default().skip(), 0);
    }
}
