use axum::{
    Json, Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors, require_admin, require_self_or_admin},
    result::ApiResult,
    routes,
};

// 公开路由
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(routes::auth::issue_token))
        .route("/health", get(health))
}

// 用户路由，全部需要认证
fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(routes::user::get_users)
                .post(routes::user::create_user)
                .route_layer(from_fn(require_admin)),
        )
        .route(
            "/users/{id}",
            get(routes::user::get_user)
                .put(routes::user::update_user)
                .route_layer(from_fn(require_self_or_admin))
                .merge(delete(routes::user::delete_user).route_layer(from_fn(require_admin))),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_routes())
        .merge(user_routes(&state));

    let base = state.config.api_base_uri.trim_end_matches('/');
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(base, api)
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(log_errors)),
        )
        .with_state(state)
}

async fn health() -> Json<ApiResult<()>> {
    Json(ApiResult::message("OK"))
}
