//! Bookings API Module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

/// Bookings router
pub fn router() -> Router<ServerState> {
    Router::new()
        // POST 为门店订座 (公开)；GET 为后台看板
        .route("/api/bookings", get(handler::list).post(handler::create))
        .route("/api/bookings/{id}/status", put(handler::update_status))
}
