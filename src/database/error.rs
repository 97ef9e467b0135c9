use thiserror::Error;

/// 存储层写操作的结果分类，上层不需要关心数据库的错误码
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {field}")]
    Conflict { field: String },
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Other(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound;
        }
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Conflict {
                    field: conflict_field(db.constraint()),
                };
            }
        }
        StoreError::Other(err)
    }
}

/// 从约束名推断冲突字段，例如 `users_email_key` -> `email`
fn conflict_field(constraint: Option<&str>) -> String {
    match constraint {
        Some(name) if name.contains("email") => "email".to_string(),
        Some(name) => name.to_string(),
        None => "record".to_string(),
    }
}
