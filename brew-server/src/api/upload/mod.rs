//! Upload API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Upload router (back-office image upload)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/upload/image", post(handler::upload_image))
}
