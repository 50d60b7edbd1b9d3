//! Contact Message Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::Message;
use surrealdb::RecordId;

/// Contact form message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_read: bool,
    pub created_at: i64,
}

impl From<MessageRecord> for Message {
    fn from(r: MessageRecord) -> Self {
        Message {
            id: serde_helpers::id_string(&r.id),
            name: r.name,
            email: r.email,
            subject: r.subject,
            body: r.body,
            is_read: r.is_read,
            created_at: r.created_at,
        }
    }
}
