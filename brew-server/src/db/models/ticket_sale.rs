//! Ticket Sale Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{Customer, TicketSale, TicketSaleStatus};
use surrealdb::RecordId;

/// Ticket sale entity
///
/// 仅在支付意向成功后写入；payment_intent_id 全表唯一，
/// 同一意向重复确认不会产生第二条记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSaleRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub sale_number: i64,
    #[serde(with = "serde_helpers::record_id")]
    pub event: RecordId,
    pub event_title: String,
    pub customer: Customer,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub payment_intent_id: String,
    pub status: TicketSaleStatus,
    pub purchased_at: i64,
}

/// Create ticket sale payload (derived from payment intent metadata)
#[derive(Debug, Clone)]
pub struct TicketSaleCreate {
    pub event: RecordId,
    pub event_title: String,
    pub customer: Customer,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub payment_intent_id: String,
}

impl From<TicketSaleRecord> for TicketSale {
    fn from(r: TicketSaleRecord) -> Self {
        TicketSale {
            id: serde_helpers::id_string(&r.id),
            sale_number: r.sale_number,
            event: r.event.to_string(),
            event_title: r.event_title,
            customer: r.customer,
            quantity: r.quantity,
            unit_price: r.unit_price,
            total_amount: r.total_amount,
            payment_intent_id: r.payment_intent_id,
            status: r.status,
            purchased_at: r.purchased_at,
        }
    }
}
