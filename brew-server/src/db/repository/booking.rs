//! Booking Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{BookingCreate, BookingRecord};
use shared::models::BookingStatus;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const BOOKING_TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All bookings, soonest requested slot first (back-office board)
    pub async fn find_all(&self) -> RepoResult<Vec<BookingRecord>> {
        let bookings: Vec<BookingRecord> = self
            .base
            .db()
            .query("SELECT * FROM booking ORDER BY date, time")
            .await?
            .take(0)?;
        Ok(bookings)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<BookingRecord>> {
        let record_id = parse_record_id(BOOKING_TABLE, id)?;
        let booking: Option<BookingRecord> = self.base.db().select(record_id).await?;
        Ok(booking)
    }

    /// Insert a booking with status `pending`
    pub async fn create(&self, data: BookingCreate) -> RepoResult<BookingRecord> {
        let now = now_millis();
        let booking = BookingRecord {
            id: None,
            reference: data.reference,
            customer: data.customer,
            party_size: data.party_size,
            date: data.date,
            time: data.time,
            status: BookingStatus::Pending,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };

        let created: Option<BookingRecord> =
            self.base.db().create(BOOKING_TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// Advance booking status; forward-only transitions enforced here
    pub async fn update_status(&self, id: &str, next: BookingStatus) -> RepoResult<BookingRecord> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))?;

        if !current.status.can_transition(next) {
            return Err(RepoError::Validation(format!(
                "Cannot change booking status from {:?} to {:?}",
                current.status, next
            )));
        }

        let record_id = parse_record_id(BOOKING_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("id", record_id))
            .bind(("status", next))
            .bind(("now", now_millis()))
            .await?;
        let bookings: Vec<BookingRecord> = result.take(0)?;
        bookings
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }

    /// Bookings created at or after the cutoff (statistics)
    pub async fn count_since(&self, since_millis: i64) -> RepoResult<i64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM booking WHERE created_at >= $since GROUP ALL")
            .bind(("since", since_millis))
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::Customer;

    async fn repo() -> BookingRepository {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();
        BookingRepository::new(service.db)
    }

    fn booking() -> BookingCreate {
        BookingCreate {
            reference: "BKG-000001".to_string(),
            customer: Customer {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                phone: Some("07700900000".to_string()),
            },
            party_size: 4,
            date: "2026-09-01".to_string(),
            time: "19:00".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let repo = repo().await;
        let created = repo.create(booking()).await.unwrap();
        assert_eq!(created.status, BookingStatus::Pending);
        let id = created.id.as_ref().unwrap().to_string();

        repo.update_status(&id, BookingStatus::Confirmed).await.unwrap();
        let done = repo
            .update_status(&id, BookingStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, BookingStatus::Completed);

        assert!(matches!(
            repo.update_status(&id, BookingStatus::Cancelled).await,
            Err(RepoError::Validation(_))
        ));
    }
}
