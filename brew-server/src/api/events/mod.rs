//! Events API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Events router
///
/// 列表路由直接挂在 `/api/events` 上（nest 的 `/` 不匹配裸路径）。
pub fn router() -> Router<ServerState> {
    Router::new()
        // 门店浏览 (GET 公开)
        .route("/api/events", get(handler::list).post(handler::create))
        .route(
            "/api/events/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        // 后台管理
        .route(
            "/api/events/{id}",
            put(handler::update).delete(handler::delete),
        )
}
