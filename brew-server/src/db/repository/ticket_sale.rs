//! Ticket Sale Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{TicketSaleCreate, TicketSaleRecord};
use shared::models::TicketSaleStatus;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SALE_TABLE: &str = "ticket_sale";

#[derive(Clone)]
pub struct TicketSaleRepository {
    base: BaseRepository,
}

impl TicketSaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All sales, purchase date descending (admin list / export view)
    pub async fn find_all(&self) -> RepoResult<Vec<TicketSaleRecord>> {
        let sales: Vec<TicketSaleRecord> = self
            .base
            .db()
            .query("SELECT * FROM ticket_sale ORDER BY purchased_at DESC")
            .await?
            .take(0)?;
        Ok(sales)
    }

    /// Look up a sale by its payment intent reference
    ///
    /// 确认接口的幂等基础：同一意向只会有一条销售记录。
    pub async fn find_by_intent(&self, intent_id: &str) -> RepoResult<Option<TicketSaleRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM ticket_sale WHERE payment_intent_id = $intent LIMIT 1")
            .bind(("intent", intent_id.to_string()))
            .await?;
        let sale: Option<TicketSaleRecord> = result.take(0)?;
        Ok(sale)
    }

    /// Insert a confirmed sale with the allocated sequential number
    pub async fn create(
        &self,
        sale_number: i64,
        data: TicketSaleCreate,
    ) -> RepoResult<TicketSaleRecord> {
        let sale = TicketSaleRecord {
            id: None,
            sale_number,
            event: data.event,
            event_title: data.event_title,
            customer: data.customer,
            quantity: data.quantity,
            unit_price: data.unit_price,
            total_amount: data.total_amount,
            payment_intent_id: data.payment_intent_id,
            status: TicketSaleStatus::Confirmed,
            purchased_at: now_millis(),
        };

        let created: Option<TicketSaleRecord> =
            self.base.db().create(SALE_TABLE).content(sale).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create ticket sale".to_string()))
    }

    /// Sales made at or after the cutoff (statistics)
    pub async fn find_since(&self, since_millis: i64) -> RepoResult<Vec<TicketSaleRecord>> {
        let sales: Vec<TicketSaleRecord> = self
            .base
            .db()
            .query(
                "SELECT * FROM ticket_sale WHERE purchased_at >= $since ORDER BY purchased_at DESC",
            )
            .bind(("since", since_millis))
            .await?
            .take(0)?;
        Ok(sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::Customer;
    use surrealdb::RecordId;

    async fn repo() -> TicketSaleRepository {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();
        TicketSaleRepository::new(service.db)
    }

    fn sale(intent: &str) -> TicketSaleCreate {
        TicketSaleCreate {
            event: RecordId::from_table_key("event", "tasting"),
            event_title: "Tasting".to_string(),
            customer: Customer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            quantity: 2,
            unit_price: 5.0,
            total_amount: 10.0,
            payment_intent_id: intent.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_intent() {
        let repo = repo().await;
        let created = repo.create(1, sale("pi_123")).await.unwrap();
        assert_eq!(created.sale_number, 1);
        assert_eq!(created.status, TicketSaleStatus::Confirmed);

        let found = repo.find_by_intent("pi_123").await.unwrap().unwrap();
        assert_eq!(found.payment_intent_id, "pi_123");
        assert!(repo.find_by_intent("pi_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_intent_rejected_by_index() {
        let repo = repo().await;
        repo.create(1, sale("pi_dup")).await.unwrap();
        // 唯一索引兜底：同一意向的第二条记录被数据库拒绝
        assert!(repo.create(2, sale("pi_dup")).await.is_err());
    }
}
