//! Ticket Sale Models
//!
//! 两段式购票流程的共享 DTO：
//! 1. `TicketIntentRequest` → 创建支付意向（不写库）
//! 2. `TicketConfirmRequest` → 确认支付后落库并返回确认号

use super::order::Customer;
use serde::{Deserialize, Serialize};

/// Maximum tickets per purchase
pub const MAX_TICKETS_PER_PURCHASE: i32 = 10;

/// Ticket sale entity
///
/// A record exists only after the payment intent succeeded; there is no
/// pending state on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSale {
    pub id: String,
    /// Sequential sale number; the confirmation number is `TKT-{:06}`
    pub sale_number: i64,
    pub event: String,
    pub event_title: String,
    pub customer: Customer,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    /// Payment processor reference (unique)
    pub payment_intent_id: String,
    pub status: TicketSaleStatus,
    pub purchased_at: i64,
}

/// Ticket sale status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketSaleStatus {
    Confirmed,
    Refunded,
}

impl TicketSale {
    /// Human-facing confirmation number, `TKT-` + zero-padded sale number
    pub fn confirmation_number(&self) -> String {
        format_confirmation_number(self.sale_number)
    }
}

/// `TKT-000042`
pub fn format_confirmation_number(sale_number: i64) -> String {
    format!("TKT-{:06}", sale_number)
}

// =============================================================================
// Purchase flow DTOs
// =============================================================================

/// Step 1: create a payment intent for a ticket purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketIntentRequest {
    pub event_id: String,
    pub quantity: i32,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
}

/// Step 1 response: everything the card form needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketIntentResponse {
    pub payment_intent_id: String,
    pub client_secret: String,
    /// Amount in minor units (pence)
    pub amount: i64,
    pub currency: String,
    pub publishable_key: String,
}

/// Step 2: confirm a completed payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfirmRequest {
    pub payment_intent_id: String,
}

/// Step 2 response: purchase confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfirmResponse {
    pub confirmation_number: String,
    pub event_title: String,
    pub customer_name: String,
    pub quantity: i32,
    pub total_amount: f64,
}
