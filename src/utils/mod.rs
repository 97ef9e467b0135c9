use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i32, // 用户ID
    pub role: Role,
    pub iat: i64, // 签发时间
    pub exp: i64, // 过期时间
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 本人或管理员可以访问该用户
    pub fn can_access(&self, user_id: i32) -> bool {
        self.is_admin() || self.user_id == user_id
    }
}

/// 为用户签发访问令牌，返回令牌和过期时间戳
pub fn generate_token(
    user: &User,
    config: &Config,
) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let exp = iat.saturating_add(config.access_token_expiration().as_secs() as i64);

    let claims = Claims {
        user_id: user.id,
        role: user.role,
        iat,
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;

    tracing::debug!("Generated token for user {}", user.id);
    Ok((token, exp))
}

pub fn verify_token(token: &str, config: &Config) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}
