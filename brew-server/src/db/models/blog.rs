//! Blog Models

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{BlogCategory, BlogPost};
use surrealdb::RecordId;

/// Blog category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCategoryRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// Blog post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub category: Option<RecordId>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub author: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create blog category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCategoryCreate {
    pub name: String,
    pub slug: Option<String>,
    pub sort_order: Option<i32>,
}

/// Create blog post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostCreate {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    /// Category id as `blog_category:...`
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub author: String,
    pub is_published: Option<bool>,
}

/// Update blog post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Derive a URL slug from a title ("Latte Art Basics" → "latte-art-basics")
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

impl From<BlogCategoryRecord> for BlogCategory {
    fn from(r: BlogCategoryRecord) -> Self {
        BlogCategory {
            id: serde_helpers::id_string(&r.id),
            name: r.name,
            slug: r.slug,
            sort_order: r.sort_order,
        }
    }
}

impl From<BlogPostRecord> for BlogPost {
    fn from(r: BlogPostRecord) -> Self {
        BlogPost {
            id: serde_helpers::id_string(&r.id),
            title: r.title,
            slug: r.slug,
            excerpt: r.excerpt,
            content: r.content,
            category: r.category.map(|c| c.to_string()),
            image_url: r.image_url,
            author: r.author,
            is_published: r.is_published,
            published_at: r.published_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
