//! Event Models

use serde::{Deserialize, Serialize};

/// Event category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCategory {
    pub id: String,
    pub name: String,
    /// Display color, `#RRGGBB`
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Event entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Event date, `YYYY-MM-DD`
    pub event_date: String,
    /// Start time, `HH:MM`
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Ticket price in pounds; 0 means a free event with no ticket sales
    pub ticket_price: f64,
    /// Capacity
    pub max_attendees: i32,
    /// Seats taken so far (incremented on each confirmed purchase)
    pub current_attendees: i32,
    #[serde(default)]
    pub is_published: bool,
}

impl Event {
    /// Seats still available
    pub fn remaining_capacity(&self) -> i32 {
        (self.max_attendees - self.current_attendees).max(0)
    }
}
