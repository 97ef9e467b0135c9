use std::sync::Arc;

use config::Config;
use services::UserService;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod result;
pub mod router;
pub mod routes;
pub mod services;
pub mod summation;
pub mod utils;
pub mod validation;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: UserService,
}
