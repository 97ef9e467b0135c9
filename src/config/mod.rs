use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub access_token_expiration_secs: u64,
    pub user_cache_ttl_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let expires_in = optional("ACCESS_TOKEN_EXPIRES_IN").unwrap_or_else(|| "1h".into());
        let access_token_expiration_secs =
            parse_duration_secs(&expires_in).ok_or(ConfigError::Invalid {
                name: "ACCESS_TOKEN_EXPIRES_IN",
                value: expires_in.clone(),
            })?;

        // Redis 不接受 0 秒过期
        let user_cache_ttl_secs: u64 = parsed("USER_CACHE_TTL_SECS", 3600)?;
        if user_cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "USER_CACHE_TTL_SECS",
                value: "0".into(),
            });
        }

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            redis_url: optional("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".into()),
            jwt_secret: required("JWT_SECRET")?,
            access_token_expiration_secs,
            user_cache_ttl_secs,
            server_host: optional("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port: parsed("SERVER_PORT", 3000)?,
            api_base_uri: optional("API_BASE_URI").unwrap_or_else(|| "/api".into()),
        })
    }

    pub fn access_token_expiration(&self) -> Duration {
        Duration::from_secs(self.access_token_expiration_secs)
    }

    pub fn user_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.user_cache_ttl_secs)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

/// 解析 `3600`、`30s`、`15m`、`1h`、`7d` 形式的时长，返回秒数
pub fn parse_duration_secs(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let (digits, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => raw.split_at(idx),
        None => (raw, "s"),
    };
    let value: u64 = digits.parse().ok()?;
    let multiplier = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        _ => return None,
    };
    value.checked_mul(multiplier)
}
