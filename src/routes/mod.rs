//! Router assembly: common routes at the root, user routes under the base path, then middleware.

mod common;
mod users;
pub use common::common_routes;
pub use users::user_routes;

use crate::middleware::{cors, json_content_type};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware, Router};

/// Full application router. `base_path` is expected normalized (see `config::normalize_base_path`).
/// Oversized bodies surface through the `Json` extractor as `AppError::PayloadTooLarge`.
/// CORS is the outermost layer so preflight and error responses carry its headers.
pub fn app_router(state: AppState, base_path: &str, body_limit: usize) -> Router {
    let users = user_routes(state.clone());
    let api = if base_path.is_empty() {
        Router::new().merge(users)
    } else {
        Router::new().nest(base_path, users)
    };
    Router::new()
        .merge(common_routes(state))
        .merge(api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(json_content_type())
        .layer(middleware::from_fn(cors))
}
