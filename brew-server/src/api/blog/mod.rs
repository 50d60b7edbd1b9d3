//! Blog API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Blog router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/blog", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // 门店浏览 (GET 公开)；POST 为后台管理
        .route("/posts", get(handler::list_posts).post(handler::create_post))
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/posts/{id}",
            put(handler::update_post).delete(handler::delete_post),
        )
}
