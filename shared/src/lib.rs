//! Shared types for the Brew platform
//!
//! Common types used by both the server and the client crates: domain
//! models, unified error codes and response structures, cart state and
//! money helpers.

pub mod cart;
pub mod client;
pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartAction, CartLine};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
