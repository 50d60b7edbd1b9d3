//! Statistics API Handlers
//!
//! 后台仪表盘聚合：营收 (订单 + 售票)、单量、订座量、趋势与热销品。
//! 全部在拉取后于内存中聚合，数据量在单店规模下可控。

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{BookingRepository, OrderRepository, TicketSaleRepository};
use crate::utils::time::days_ago_millis;
use shared::models::OrderStatus;
use shared::{ApiResponse, AppResult, money, util};

// ============================================================================
// Response Types
// ============================================================================

/// Overview statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewStats {
    /// Order revenue + ticket revenue (cancelled orders excluded)
    pub revenue: f64,
    pub order_revenue: f64,
    pub ticket_revenue: f64,
    pub orders: i64,
    pub cancelled_orders: i64,
    pub bookings: i64,
    pub tickets_sold: i64,
    pub average_order_value: f64,
}

/// Revenue trend data point (one per day)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueTrendPoint {
    pub date: String,
    pub value: f64,
}

/// Top menu item by units sold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub sales: i64,
}

/// Full statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub overview: OverviewStats,
    pub revenue_trend: Vec<RevenueTrendPoint>,
    pub top_items: Vec<TopItem>,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    /// 统计窗口天数 (默认 30)
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

/// GET /api/statistics?days=N - 仪表盘统计
pub async fn overview(
    State(state): State<ServerState>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<Json<ApiResponse<StatisticsResponse>>> {
    let since = days_ago_millis(query.days.clamp(1, 365));
    let db = state.get_db();

    let orders = OrderRepository::new(db.clone()).find_since(since).await?;
    let sales = TicketSaleRepository::new(db.clone()).find_since(since).await?;
    let bookings = BookingRepository::new(db).count_since(since).await?;

    let mut order_revenue = 0.0;
    let mut cancelled_orders = 0i64;
    let mut counted_orders = 0i64;
    let mut trend: HashMap<String, f64> = HashMap::new();
    let mut item_sales: HashMap<String, i64> = HashMap::new();

    for order in &orders {
        if order.status == OrderStatus::Cancelled {
            cancelled_orders += 1;
            continue;
        }
        counted_orders += 1;
        order_revenue += order.total_amount;
        *trend.entry(day_of(order.created_at)).or_default() += order.total_amount;
        for line in &order.items {
            *item_sales.entry(line.name.clone()).or_default() += line.quantity as i64;
        }
    }

    let mut ticket_revenue = 0.0;
    let mut tickets_sold = 0i64;
    for sale in &sales {
        ticket_revenue += sale.total_amount;
        tickets_sold += sale.quantity as i64;
        *trend.entry(day_of(sale.purchased_at)).or_default() += sale.total_amount;
    }

    let revenue = money::round_money(order_revenue + ticket_revenue);
    let average_order_value = if counted_orders > 0 {
        money::round_money(order_revenue / counted_orders as f64)
    } else {
        0.0
    };

    let mut revenue_trend: Vec<RevenueTrendPoint> = trend
        .into_iter()
        .map(|(date, value)| RevenueTrendPoint {
            date,
            value: money::round_money(value),
        })
        .collect();
    revenue_trend.sort_by(|a, b| a.date.cmp(&b.date));

    let mut top_items: Vec<TopItem> = item_sales
        .into_iter()
        .map(|(name, sales)| TopItem { name, sales })
        .collect();
    top_items.sort_by(|a, b| b.sales.cmp(&a.sales).then(a.name.cmp(&b.name)));
    top_items.truncate(10);

    Ok(Json(ApiResponse::success(StatisticsResponse {
        overview: OverviewStats {
            revenue,
            order_revenue: money::round_money(order_revenue),
            ticket_revenue: money::round_money(ticket_revenue),
            orders: counted_orders,
            cancelled_orders,
            bookings,
            tickets_sold,
            average_order_value,
        },
        revenue_trend,
        top_items,
    })))
}

/// "YYYY-MM-DD" bucket for a millisecond timestamp
fn day_of(millis: i64) -> String {
    util::format_millis(millis)
        .chars()
        .take(10)
        .collect()
}
