//! Order Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{Customer, Order, OrderLine, OrderStatus, OrderType};
use surrealdb::RecordId;

/// Order entity
///
/// 行项在下单时由服务端按当前菜单定价生成，之后不可变；
/// 状态流转守卫见 `shared::models::OrderStatus`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub order_number: String,
    pub customer: Customer,
    pub order_type: OrderType,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub items: Vec<OrderLine>,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload (already priced by the checkout handler)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub order_number: String,
    pub customer: Customer,
    pub order_type: OrderType,
    pub delivery_address: Option<String>,
    pub items: Vec<OrderLine>,
    pub total_amount: f64,
    pub notes: Option<String>,
}

impl From<OrderRecord> for Order {
    fn from(r: OrderRecord) -> Self {
        Order {
            id: serde_helpers::id_string(&r.id),
            order_number: r.order_number,
            customer: r.customer,
            order_type: r.order_type,
            delivery_address: r.delivery_address,
            items: r.items,
            total_amount: r.total_amount,
            status: r.status,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
