//! Menu Models

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{MenuCategory, MenuItem};
use surrealdb::RecordId;

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub category: Option<RecordId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_available: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Create menu category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Category id as `menu_category:...`
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Bulk availability toggle payload (back-office list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAvailabilityUpdate {
    /// Menu item ids as `menu_item:...`
    pub ids: Vec<String>,
    pub is_available: bool,
}

impl From<MenuCategoryRecord> for MenuCategory {
    fn from(r: MenuCategoryRecord) -> Self {
        MenuCategory {
            id: serde_helpers::id_string(&r.id),
            name: r.name,
            description: r.description,
            sort_order: r.sort_order,
            is_active: r.is_active,
        }
    }
}

impl From<MenuItemRecord> for MenuItem {
    fn from(r: MenuItemRecord) -> Self {
        MenuItem {
            id: serde_helpers::id_string(&r.id),
            name: r.name,
            description: r.description,
            price: r.price,
            category: r.category.map(|c| c.to_string()),
            image_url: r.image_url,
            is_available: r.is_available,
            is_featured: r.is_featured,
            sort_order: r.sort_order,
            tags: r.tags,
        }
    }
}
