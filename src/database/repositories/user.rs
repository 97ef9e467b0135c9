use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::StoreError;
use crate::database::models::user::UserEntity;
use crate::models::{NewUser, User, UserChanges, UserFilters};

/// 用户持久化存储
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, data: &NewUser) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// 按 created_at 倒序返回过滤后的一页
    async fn find_many(
        &self,
        filters: &UserFilters,
        skip: i64,
        take: i64,
    ) -> Result<Vec<User>, StoreError>;

    async fn count(&self, filters: &UserFilters) -> Result<u64, StoreError>;

    async fn update(&self, id: i32, data: &UserChanges) -> Result<User, StoreError>;

    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

const USER_COLUMNS: &str = "id, name, email, gender, role, created_at";

/// 基于 PostgreSQL 的用户存储库
#[derive(Clone)]
pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, data: &NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (name, email, gender, role)
            VALUES ($1, $2, $3, COALESCE($4, 'user'))
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.gender.map(|g| g.as_str()))
        .bind(data.role.map(|r| r.as_str()))
        .fetch_one(&self.db)
        .await?;

        tracing::debug!("Inserted user row {}", row.id);
        row.try_into()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_many(
        &self,
        filters: &UserFilters,
        skip: i64,
        take: i64,
    ) -> Result<Vec<User>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filters(&mut qb, filters);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(take)
            .push(" OFFSET ")
            .push_bind(skip);

        let rows = qb
            .build_query_as::<UserEntity>()
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn count(&self, filters: &UserFilters) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filters(&mut qb, filters);

        let total = qb.build_query_scalar::<i64>().fetch_one(&self.db).await?;
        Ok(total.max(0) as u64)
    }

    async fn update(&self, id: i32, data: &UserChanges) -> Result<User, StoreError> {
        // 未提供的字段保持原值
        let row = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                email = COALESCE($2, email),
                gender = COALESCE($3, gender),
                role = COALESCE($4, role)
            WHERE id = $5
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(data.name.as_deref())
        .bind(data.email.as_deref())
        .bind(data.gender.map(|g| g.as_str()))
        .bind(data.role.map(|r| r.as_str()))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.ok_or(StoreError::NotFound)?.try_into()
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &UserFilters) {
    qb.push(" WHERE TRUE");
    if let Some(gender) = filters.gender {
        qb.push(" AND gender = ").push_bind(gender.as_str());
    }
    if let Some(role) = filters.role {
        qb.push(" AND role = ").push_bind(role.as_str());
    }
    if let Some(term) = &filters.search {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// 转义 LIKE 通配符，搜索词按字面匹配
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
