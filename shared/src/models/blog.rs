//! Blog Models

use serde::{Deserialize, Serialize};

/// Blog category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// Blog post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub author: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}
