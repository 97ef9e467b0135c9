mod auth;
mod error_handler;

pub use auth::{auth_middleware, require_admin, require_self_or_admin};
pub use error_handler::log_errors;
