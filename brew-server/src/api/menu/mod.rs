//! Menu API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Menu router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // 门店浏览 (GET 公开)；POST 为后台管理
        .route("/items", get(handler::list_items).post(handler::create_item))
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/items/{id}",
            put(handler::update_item).delete(handler::delete_item),
        )
        .route("/items/bulk-availability", post(handler::bulk_availability))
}
