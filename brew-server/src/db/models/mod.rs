//! Database Models
//!
//! SurrealDB 侧的实体定义。API 层通过 `From` 转换为 `shared::models` 中的
//! 客户端模型（RecordId → `table:id` 字符串）。

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod menu;

// Commerce
pub mod booking;
pub mod order;

// Events & tickets
pub mod event;
pub mod ticket_sale;

// Content
pub mod blog;
pub mod message;

// Back office
pub mod staff;

// Re-exports
pub use blog::{BlogCategoryCreate, BlogCategoryRecord, BlogPostCreate, BlogPostRecord, BlogPostUpdate};
pub use booking::{BookingCreate, BookingRecord};
pub use event::{EventCategoryCreate, EventCategoryRecord, EventCreate, EventRecord, EventUpdate};
pub use menu::{
    BulkAvailabilityUpdate, MenuCategoryCreate, MenuCategoryRecord, MenuItemCreate, MenuItemRecord,
    MenuItemUpdate,
};
pub use message::MessageRecord;
pub use order::{OrderCreate, OrderRecord};
pub use staff::Staff;
pub use ticket_sale::{TicketSaleCreate, TicketSaleRecord};
