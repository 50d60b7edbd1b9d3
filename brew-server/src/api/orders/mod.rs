//! Orders API Module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

/// Orders router
pub fn router() -> Router<ServerState> {
    Router::new()
        // POST 为门店下单 (公开)；GET 为后台看板
        .route("/api/orders", get(handler::list).post(handler::checkout))
        .route("/api/orders/{id}/status", put(handler::update_status))
}
