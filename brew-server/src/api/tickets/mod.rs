//! Tickets API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Tickets router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // 购票流程 (公开)
        .route("/payment-intent", post(handler::create_payment_intent))
        .route("/confirm", post(handler::confirm))
        // 沙盒模式下模拟完成支付 (真实密钥下返回 404 语义)
        .route("/sandbox/complete", post(handler::sandbox_complete))
        // 后台销售记录
        .route("/sales", get(handler::list_sales))
        .route("/sales/export", get(handler::export_sales_csv))
}
