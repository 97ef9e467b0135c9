use std::collections::HashMap;

use axum::{
    extract::{Extension, Json, Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    AppState,
    error::AppError,
    models::User,
    result::{ApiResult, PageMeta},
    routes::{json_body, path_user_id},
    utils::Claims,
    validation::{validate_create_user, validate_list_query, validate_update_user},
};

/// POST /users
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResult<User>>), AppError> {
    let data = validate_create_user(&json_body(body)?).map_err(AppError::Validation)?;
    let user = state.users.create(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResult::success("User created successfully", user)),
    ))
}

/// GET /users
#[axum::debug_handler]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResult<Vec<User>>>, AppError> {
    let (filters, page) = validate_list_query(&params).map_err(AppError::Validation)?;
    let result = state.users.list(filters, page).await?;

    let meta = PageMeta::new(result.total, result.page, result.limit);
    Ok(Json(ApiResult::paged(
        "Users retrieved successfully",
        result.users,
        meta,
    )))
}

/// GET /users/{id}
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResult<User>>, AppError> {
    let id = path_user_id(&id)?;

    match state.users.fetch(id).await? {
        Some(user) => Ok(Json(ApiResult::success("User retrieved successfully", user))),
        None => Err(AppError::NotFound("User")),
    }
}

/// PUT /users/{id}
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResult<User>>, AppError> {
    let id = path_user_id(&id)?;
    let changes = validate_update_user(&json_body(body)?).map_err(AppError::Validation)?;

    // 只有管理员可以修改角色
    if changes.role.is_some() && !claims.is_admin() {
        tracing::warn!("User {} attempted to change role of user {}", claims.user_id, id);
        return Err(AppError::Forbidden);
    }
    let user = state.users.update(id, changes).await?;

    Ok(Json(ApiResult::success("User updated successfully", user)))
}

/// DELETE /users/{id}
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResult<()>>, AppError> {
    let id = path_user_id(&id)?;
    state.users.delete(id).await?;

    Ok(Json(ApiResult::message("User deleted successfully")))
}
