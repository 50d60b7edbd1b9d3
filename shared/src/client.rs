//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.
//! These types are shared between brew-server and brew-client.

use serde::{Deserialize, Serialize};

use crate::models::{BlogPost, Event, MenuSection};

// Re-export the response envelope for client convenience
pub use crate::error::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
}

// =============================================================================
// Public content API DTOs
// =============================================================================

/// Read-only storefront aggregate: everything the public site renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicContent {
    /// Available menu grouped by category
    pub menu: Vec<MenuSection>,
    /// Published upcoming events
    pub events: Vec<Event>,
    /// Published blog posts, newest first
    pub posts: Vec<BlogPost>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
