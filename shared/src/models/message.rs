//! Contact Message Models

use serde::{Deserialize, Serialize};

/// Contact form message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: i64,
}

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
}
