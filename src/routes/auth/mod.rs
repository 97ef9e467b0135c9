mod handler;
pub mod model;

pub use handler::issue_token;
