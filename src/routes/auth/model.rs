use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 登录请求，userId 可以是数字或数字字符串
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
}

impl AuthRequest {
    pub fn user_id(&self) -> Option<i32> {
        let id = match self.user_id.as_ref()? {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        };
        id.filter(|id| *id > 0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Option<i32> {
        serde_json::from_value::<AuthRequest>(body).unwrap().user_id()
    }

    #[test]
    fn accepts_number_or_numeric_string() {
        assert_eq!(parse(json!({ "userId": 5 })), Some(5));
        assert_eq!(parse(json!({ "userId": "12" })), Some(12));
    }

    #[test]
    fn rejects_missing_or_invalid() {
        assert_eq!(parse(json!({})), None);
        assert_eq!(parse(json!({ "userId": null })), None);
        assert_eq!(parse(json!({ "userId": "abc" })), None);
        assert_eq!(parse(json!({ "userId": 0 })), None);
        assert_eq!(parse(json!({ "userId": 1.5 })), None);
        assert_eq!(parse(json!({ "userId": 9_999_999_999i64 })), None);
    }
}
