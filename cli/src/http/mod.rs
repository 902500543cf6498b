//! HTTP部署钩子服务

pub mod middleware;
pub mod routes;
pub mod server;
mod state;

pub use state::AppState;
