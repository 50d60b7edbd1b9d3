//! Event Models

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{Event, EventCategory};
use surrealdb::RecordId;

/// Event category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCategoryRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Event entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub category: Option<RecordId>,
    pub event_date: String,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub ticket_price: f64,
    pub max_attendees: i32,
    #[serde(default)]
    pub current_attendees: i32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_published: bool,
}

impl EventRecord {
    /// Seats still available
    pub fn remaining_capacity(&self) -> i32 {
        (self.max_attendees - self.current_attendees).max(0)
    }
}

/// Create event category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCategoryCreate {
    pub name: String,
    pub color: Option<String>,
    pub sort_order: Option<i32>,
}

/// Create event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    /// Category id as `event_category:...`
    pub category: Option<String>,
    pub event_date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub ticket_price: f64,
    pub max_attendees: i32,
    pub is_published: Option<bool>,
}

/// Update event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl From<EventCategoryRecord> for EventCategory {
    fn from(r: EventCategoryRecord) -> Self {
        EventCategory {
            id: serde_helpers::id_string(&r.id),
            name: r.name,
            color: r.color,
            sort_order: r.sort_order,
        }
    }
}

impl From<EventRecord> for Event {
    fn from(r: EventRecord) -> Self {
        Event {
            id: serde_helpers::id_string(&r.id),
            title: r.title,
            description: r.description,
            category: r.category.map(|c| c.to_string()),
            event_date: r.event_date,
            start_time: r.start_time,
            end_time: r.end_time,
            location: r.location,
            image_url: r.image_url,
            ticket_price: r.ticket_price,
            max_attendees: r.max_attendees,
            current_attendees: r.current_attendees,
            is_published: r.is_published,
        }
    }
}
