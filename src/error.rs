use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::database::StoreError;
use crate::result::ApiResult;
use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("access denied")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("User"),
            StoreError::Conflict { field } => AppError::Conflict(capitalize(&field)),
            StoreError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => ApiResult::<()> {
                errors: Some(errors),
                ..ApiResult::error("Validation error")
            },
            AppError::BadRequest(message) | AppError::Unauthorized(message) => {
                ApiResult::error(&message)
            }
            AppError::Forbidden => ApiResult::error("Access denied"),
            AppError::NotFound(what) => ApiResult::error(&format!("{what} not found")),
            AppError::Conflict(what) => ApiResult::error(&format!("{what} already exists")),
            AppError::Internal(detail) => {
                // 细节只写日志，不返回给调用方
                tracing::error!("Internal error: {}", detail);
                ApiResult::error("Internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}
