//! Booking Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{Booking, BookingStatus, Customer};
use surrealdb::RecordId;

/// Table booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub reference: String,
    pub customer: Customer,
    pub party_size: i32,
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create booking payload (validated by the handler)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub reference: String,
    pub customer: Customer,
    pub party_size: i32,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

impl From<BookingRecord> for Booking {
    fn from(r: BookingRecord) -> Self {
        Booking {
            id: serde_helpers::id_string(&r.id),
            reference: r.reference,
            customer: r.customer,
            party_size: r.party_size,
            date: r.date,
            time: r.time,
            status: r.status,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
