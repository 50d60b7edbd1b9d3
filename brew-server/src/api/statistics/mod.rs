//! Statistics API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Statistics router (back-office dashboard, admin only)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/statistics", get(handler::overview))
        .layer(middleware::from_fn(require_admin))
}
