//! Brew Client - HTTP client for the Brew Server
//!
//! Typed service wrappers over the server's API. Every call normalizes the
//! `ApiResponse` envelope into `ClientResult<T>`. The storefront surface is
//! a trait with two implementations: the real HTTP client and an in-memory
//! fixture store for demo mode (backend not configured/reachable).

pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod storefront;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use fixtures::FixtureStore;
pub use http::HttpClient;
pub use storefront::{StorefrontApi, storefront};

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, LoginResponse, PublicContent, UserInfo};
