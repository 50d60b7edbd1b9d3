//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

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

// System
pub mod counter;

// Re-exports
pub use blog::BlogRepository;
pub use booking::BookingRepository;
pub use counter::CounterRepository;
pub use event::EventRepository;
pub use menu::{MenuCategoryRepository, MenuItemRepository};
pub use message::MessageRepository;
pub use order::OrderRepository;
pub use staff::StaffRepository;
pub use ticket_sale::TicketSaleRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for shared::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => {
                shared::AppError::with_message(shared::ErrorCode::NotFound, msg)
            }
            RepoError::Duplicate(msg) => shared::AppError::conflict(msg),
            RepoError::Validation(msg) => shared::AppError::validation(msg),
            RepoError::Database(msg) => shared::AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "event:abc".parse()?;
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId
//
// 跨表引用 (menu_item.category 等) 以 "table:id" 字符串形式入库，
// 比较时绑定字符串参数。

/// Parse a `table:id` string, checking the table prefix
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<surrealdb::RecordId> {
    let record_id: surrealdb::RecordId = id
        .parse()
        .map_err(|_| RepoError::NotFound(format!("Invalid id format: {}", id)))?;
    if record_id.table() != table {
        return Err(RepoError::NotFound(format!(
            "Id {} does not belong to table {}",
            id, table
        )));
    }
    Ok(record_id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
