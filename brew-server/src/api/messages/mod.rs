//! Messages API Module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

/// Messages router
pub fn router() -> Router<ServerState> {
    Router::new()
        // POST 为联系表单 (公开)；GET 为后台收件箱
        .route("/api/messages", get(handler::list).post(handler::create))
        .route(
            "/api/messages/{id}",
            put(handler::mark_read).delete(handler::delete),
        )
}
