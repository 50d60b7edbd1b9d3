//! Public Content API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Public content router (read-only, unauthenticated)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/public/content", get(handler::content))
}
