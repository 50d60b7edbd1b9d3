//! Data models
//!
//! Shared between brew-server and the storefront/back-office frontends
//! (via API). All IDs are `String` in the form `table:id` (SurrealDB record
//! id rendered as a string); timestamps are Unix milliseconds.

pub mod blog;
pub mod booking;
pub mod event;
pub mod menu;
pub mod message;
pub mod order;
pub mod ticket;

// Re-exports
pub use blog::*;
pub use booking::*;
pub use event::*;
pub use menu::*;
pub use message::*;
pub use order::*;
pub use ticket::*;
