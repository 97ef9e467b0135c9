use axum::extract::{Json, State, rejection::JsonRejection};

use crate::{AppState, error::AppError, utils::generate_token};

use super::model::{AuthRequest, AuthResponse};

/// POST /auth，为已存在的用户签发访问令牌
#[axum::debug_handler]
pub async fn issue_token(
    State(state): State<AppState>,
    body: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let user_id = req
        .user_id()
        .ok_or_else(|| AppError::BadRequest("User ID is required".into()))?;

    let Some(user) = state.users.fetch(user_id).await? else {
        tracing::warn!("Authentication failed for unknown user {}", user_id);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    let (access_token, expires_at) = generate_token(&user, &state.config).map_err(|e| {
        AppError::Internal(format!("failed to sign token for user {}: {}", user.id, e))
    })?;

    tracing::info!("Authentication successful for user {}", user.id);
    Ok(Json(AuthResponse {
        access_token,
        expires_at,
    }))
}
