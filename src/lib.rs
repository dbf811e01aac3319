//! Users REST API: single-table CRUD over PostgreSQL with permissive CORS.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use models::{User, UserInput};
pub use routes::{app_router, common_routes, user_routes};
pub use service::{MemoryUserStore, PgUserStore, UserStore};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_users_table};
