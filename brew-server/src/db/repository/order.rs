//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{OrderCreate, OrderRecord};
use shared::models::OrderStatus;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, newest first (back-office board)
    pub async fn find_all(&self) -> RepoResult<Vec<OrderRecord>> {
        let orders: Vec<OrderRecord> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderRecord>> {
        let record_id = parse_record_id(ORDER_TABLE, id)?;
        let order: Option<OrderRecord> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// Insert a priced order with status `pending`
    pub async fn create(&self, data: OrderCreate) -> RepoResult<OrderRecord> {
        let now = now_millis();
        let order = OrderRecord {
            id: None,
            order_number: data.order_number,
            customer: data.customer,
            order_type: data.order_type,
            delivery_address: data.delivery_address,
            items: data.items,
            total_amount: data.total_amount,
            status: OrderStatus::Pending,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };

        let created: Option<OrderRecord> =
            self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Advance order status; forward-only transitions enforced here
    pub async fn update_status(&self, id: &str, next: OrderStatus) -> RepoResult<OrderRecord> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        if !current.status.can_transition(next) {
            return Err(RepoError::Validation(format!(
                "Cannot change order status from {:?} to {:?}",
                current.status, next
            )));
        }

        let record_id = parse_record_id(ORDER_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("id", record_id))
            .bind(("status", next))
            .bind(("now", now_millis()))
            .await?;
        let orders: Vec<OrderRecord> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Orders created at or after the cutoff (statistics)
    pub async fn find_since(&self, since_millis: i64) -> RepoResult<Vec<OrderRecord>> {
        let orders: Vec<OrderRecord> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE created_at >= $since ORDER BY created_at DESC")
            .bind(("since", since_millis))
            .await?
            .take(0)?;
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{Customer, OrderLine, OrderType};

    async fn repo() -> OrderRepository {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();
        OrderRepository::new(service.db)
    }

    fn order(number: &str) -> OrderCreate {
        OrderCreate {
            order_number: number.to_string(),
            customer: Customer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            order_type: OrderType::Collection,
            delivery_address: None,
            items: vec![OrderLine {
                menu_item: "menu_item:espresso".to_string(),
                name: "Espresso".to_string(),
                unit_price: 2.20,
                quantity: 2,
                line_total: 4.40,
            }],
            total_amount: 4.40,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let repo = repo().await;
        let created = repo.create(order("ORD-000001")).await.unwrap();
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.total_amount, 4.40);
    }

    #[tokio::test]
    async fn test_status_guard() {
        let repo = repo().await;
        let created = repo.create(order("ORD-000002")).await.unwrap();
        let id = created.id.as_ref().unwrap().to_string();

        let confirmed = repo
            .update_status(&id, OrderStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, OrderStatus::Confirmed);

        // 不允许回退
        assert!(matches!(
            repo.update_status(&id, OrderStatus::Pending).await,
            Err(RepoError::Validation(_))
        ));
        // 不允许跳级
        assert!(matches!(
            repo.update_status(&id, OrderStatus::Completed).await,
            Err(RepoError::Validation(_))
        ));

        repo.update_status(&id, OrderStatus::InProgress).await.unwrap();
        let done = repo.update_status(&id, OrderStatus::Completed).await.unwrap();
        assert_eq!(done.status, OrderStatus::Completed);

        // 终态后不可取消
        assert!(matches!(
            repo.update_status(&id, OrderStatus::Cancelled).await,
            Err(RepoError::Validation(_))
        ));
    }
}
