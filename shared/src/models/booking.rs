//! Booking Models

use super::order::Customer;
use serde::{Deserialize, Serialize};

/// Minimum / maximum party size accepted online
pub const MIN_PARTY_SIZE: i32 = 1;
pub const MAX_PARTY_SIZE: i32 = 12;

/// Booking status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Whether a transition to `next` is allowed (forward-only)
    pub fn can_transition(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        match (self, next) {
            (Pending, Confirmed) => true,
            (Confirmed, Completed) => true,
            (Pending | Confirmed, Cancelled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

/// Table booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    /// Sequential human-facing reference, `BKG-000017`
    pub reference: String,
    pub customer: Customer,
    pub party_size: i32,
    /// Requested date, `YYYY-MM-DD`
    pub date: String,
    /// Requested time, `HH:MM`
    pub time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Booking request submitted by the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer: Customer,
    pub party_size: i32,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition(Confirmed));
        assert!(Confirmed.can_transition(Completed));
        assert!(Pending.can_transition(Cancelled));
        assert!(Confirmed.can_transition(Cancelled));

        assert!(!Completed.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Pending));
        assert!(!Pending.can_transition(Completed));
    }
}
