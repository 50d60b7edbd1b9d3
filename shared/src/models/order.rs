//! Order Models
//!
//! 订单状态只允许向前流转：pending → confirmed → in_progress → completed，
//! 未完成前可随时取消。状态守卫在 [`OrderStatus::can_transition`] 实现，
//! 服务端与前端共用。

use serde::{Deserialize, Serialize};

/// Order fulfilment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Collection,
    Delivery,
}

/// Order status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether a transition to `next` is allowed (forward-only)
    pub fn can_transition(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Pending, Confirmed) => true,
            (Confirmed, InProgress) => true,
            (InProgress, Completed) => true,
            // 未完成订单可取消
            (Pending | Confirmed | InProgress, Cancelled) => true,
            _ => false,
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

/// Customer contact fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Order line as stored on the order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item id at purchase time
    pub menu_item: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub line_total: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Sequential human-facing number, `ORD-000042`
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

// =============================================================================
// Storefront DTOs
// =============================================================================

/// One requested line at checkout; prices are looked up server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub menu_item: String,
    pub quantity: i32,
}

/// Checkout payload submitted by the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub customer: Customer,
    pub order_type: OrderType,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub items: Vec<OrderLineInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Status update payload (admin board)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate<S> {
    pub status: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition(Confirmed));
        assert!(Confirmed.can_transition(InProgress));
        assert!(InProgress.can_transition(Completed));
    }

    #[test]
    fn test_cancellation() {
        use OrderStatus::*;
        assert!(Pending.can_transition(Cancelled));
        assert!(Confirmed.can_transition(Cancelled));
        assert!(InProgress.can_transition(Cancelled));
        // 已完成订单不可取消
        assert!(!Completed.can_transition(Cancelled));
    }

    #[test]
    fn test_backward_and_terminal_rejected() {
        use OrderStatus::*;
        assert!(!Confirmed.can_transition(Pending));
        assert!(!Completed.can_transition(InProgress));
        assert!(!Cancelled.can_transition(Confirmed));
        assert!(!Pending.can_transition(Completed)); // no skipping
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!InProgress.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let status: OrderStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, OrderStatus::Pending);
    }
}
