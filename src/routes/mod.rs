use axum::extract::{Json, rejection::JsonRejection};
use serde_json::Value;

use crate::error::AppError;
use crate::validation::parse_user_id;

pub mod auth;
pub mod user;

/// 请求体不是合法 JSON 时统一返回 400
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(e) => {
            tracing::debug!("Rejected request body: {}", e.body_text());
            Err(AppError::BadRequest("Invalid JSON body".into()))
        }
    }
}

pub(crate) fn path_user_id(raw: &str) -> Result<i32, AppError> {
    parse_user_id(raw).ok_or_else(|| AppError::BadRequest("Invalid user ID".into()))
}
