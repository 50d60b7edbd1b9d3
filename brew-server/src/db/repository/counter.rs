//! Counter Repository
//!
//! 原子自增序列，用于订单号 / 订座号 / 售票确认号。
//! `UPSERT counter:<name> SET value += 1` 在数据库内完成读改写。

use super::{BaseRepository, RepoError, RepoResult};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Named sequences
pub const SEQ_ORDERS: &str = "orders";
pub const SEQ_BOOKINGS: &str = "bookings";
pub const SEQ_TICKET_SALES: &str = "ticket_sales";

#[derive(Debug, Deserialize)]
struct CounterRow {
    value: i64,
}

#[derive(Clone)]
pub struct CounterRepository {
    base: BaseRepository,
}

impl CounterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Atomically advance the named sequence and return its new value
    ///
    /// The first call for a sequence returns 1.
    pub async fn next(&self, name: &str) -> RepoResult<i64> {
        let id = surrealdb::RecordId::from_table_key("counter", name);
        let mut result = self
            .base
            .db()
            .query("UPSERT $id SET value += 1 RETURN AFTER")
            .bind(("id", id))
            .await?;
        let row: Option<CounterRow> = result.take(0)?;
        row.map(|r| r.value)
            .ok_or_else(|| RepoError::Database(format!("Counter {} did not return a value", name)))
    }
}
