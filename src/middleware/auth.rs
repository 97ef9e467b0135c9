use axum::{
    body::Body,
    extract::{Extension, Path, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::{AppState, error::AppError, utils::{Claims, verify_token}};

/// 校验 Bearer 令牌，并把 Claims 放进请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Ok(TypedHeader(Authorization(bearer))) = bearer else {
        tracing::warn!("No token provided");
        return Err(AppError::Unauthorized("No token provided".into()));
    };

    let claims = verify_token(bearer.token(), &state.config).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".into())
    })?;

    tracing::debug!("Token verified for user {} ({})", claims.user_id, claims.role);
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// 仅管理员可访问
pub async fn require_admin(
    Extension(claims): Extension<Claims>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !claims.is_admin() {
        tracing::warn!("User {} is not an admin", claims.user_id);
        return Err(AppError::Forbidden);
    }
    Ok(next.run(req).await)
}

/// 路径中的 `{id}` 必须是本人，管理员不受限
pub async fn require_self_or_admin(
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // 非数字 ID 交给 handler 返回 400，但只对管理员放行
    let allowed = match id.trim().parse::<i32>() {
        Ok(id) => claims.can_access(id),
        Err(_) => claims.is_admin(),
    };

    if !allowed {
        tracing::warn!("User {} may not access user {}", claims.user_id, id);
        return Err(AppError::Forbidden);
    }
    Ok(next.run(req).await)
}
