use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::database::StoreError;
use crate::models::User;

/// users 表的一行
#[derive(Debug, FromRow)]
pub struct UserEntity {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserEntity> for User {
    type Error = StoreError;

    fn try_from(row: UserEntity) -> Result<Self, Self::Error> {
        let gender = match row.gender.as_deref() {
            Some(raw) => Some(raw.parse().map_err(|_| decode_error("gender", raw))?),
            None => None,
        };
        let role = row.role.parse().map_err(|_| decode_error("role", &row.role))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            gender,
            role,
            created_at: row.created_at,
        })
    }
}

fn decode_error(column: &str, value: &str) -> StoreError {
    StoreError::Other(sqlx::Error::Decode(
        format!("unexpected {column} value in users table: {value}").into(),
    ))
}
