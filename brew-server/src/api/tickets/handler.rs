//! Tickets API Handlers

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::TicketSaleRepository;
use crate::utils::csv;
use shared::models::{
    TicketConfirmRequest, TicketConfirmResponse, TicketIntentRequest, TicketIntentResponse,
    TicketSale,
};
use shared::{ApiResponse, AppError, AppResult};

/// POST /api/tickets/payment-intent - 创建购票支付意向
pub async fn create_payment_intent(
    State(state): State<ServerState>,
    Json(payload): Json<TicketIntentRequest>,
) -> AppResult<Json<ApiResponse<TicketIntentResponse>>> {
    let response = state.ticket_service().create_payment_intent(payload).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// POST /api/tickets/confirm - 确认支付并记录售票
pub async fn confirm(
    State(state): State<ServerState>,
    Json(payload): Json<TicketConfirmRequest>,
) -> AppResult<Json<ApiResponse<TicketConfirmResponse>>> {
    let response = state.ticket_service().confirm_purchase(payload).await?;
    Ok(Json(ApiResponse::success(response)))
}

#[derive(Debug, Deserialize)]
pub struct SandboxCompleteRequest {
    pub payment_intent_id: String,
}

/// POST /api/tickets/sandbox/complete - 沙盒模式模拟持卡人完成支付
///
/// 仅沙盒支付下可用；配置了真实密钥时视为未知路径。
pub async fn sandbox_complete(
    State(state): State<ServerState>,
    Json(payload): Json<SandboxCompleteRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let sandbox = state
        .payments
        .sandbox()
        .ok_or_else(|| AppError::not_found("Sandbox payments"))?;
    sandbox.complete_payment(&payload.payment_intent_id)?;
    Ok(Json(ApiResponse::ok()))
}

/// GET /api/tickets/sales - 售票记录 (按购买时间倒序)
pub async fn list_sales(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<TicketSale>>>> {
    let repo = TicketSaleRepository::new(state.get_db());
    let sales = repo.find_all().await?;
    Ok(Json(ApiResponse::success(
        sales.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/tickets/sales/export - 售票记录 CSV 导出
pub async fn export_sales_csv(
    State(state): State<ServerState>,
) -> AppResult<impl IntoResponse> {
    let repo = TicketSaleRepository::new(state.get_db());
    let sales: Vec<TicketSale> = repo.find_all().await?.into_iter().map(Into::into).collect();

    let body = csv::ticket_sales_csv(&sales);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"ticket-sales.csv\""),
    );

    Ok((headers, body))
}
