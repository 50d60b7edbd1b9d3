//! Event Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{
    EventCategoryCreate, EventCategoryRecord, EventCreate, EventRecord, EventUpdate,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const EVENT_TABLE: &str = "event";
const CATEGORY_TABLE: &str = "event_category";

#[derive(Clone)]
pub struct EventRepository {
    base: BaseRepository,
}

impl EventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All events, soonest first (back-office view)
    pub async fn find_all(&self) -> RepoResult<Vec<EventRecord>> {
        let events: Vec<EventRecord> = self
            .base
            .db()
            .query("SELECT * FROM event ORDER BY event_date, start_time")
            .await?
            .take(0)?;
        Ok(events)
    }

    /// Published events only (storefront view)
    pub async fn find_published(&self) -> RepoResult<Vec<EventRecord>> {
        let events: Vec<EventRecord> = self
            .base
            .db()
            .query("SELECT * FROM event WHERE is_published = true ORDER BY event_date, start_time")
            .await?
            .take(0)?;
        Ok(events)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<EventRecord>> {
        let record_id = parse_record_id(EVENT_TABLE, id)?;
        let event: Option<EventRecord> = self.base.db().select(record_id).await?;
        Ok(event)
    }

    /// Create a new event
    pub async fn create(&self, data: EventCreate) -> RepoResult<EventRecord> {
        if data.max_attendees < 0 {
            return Err(RepoError::Validation(format!(
                "max_attendees must be non-negative, got {}",
                data.max_attendees
            )));
        }
        if data.ticket_price < 0.0 || !data.ticket_price.is_finite() {
            return Err(RepoError::Validation(format!(
                "ticket_price must be non-negative, got {}",
                data.ticket_price
            )));
        }

        let category = match data.category {
            Some(ref c) => Some(parse_record_id(CATEGORY_TABLE, c)?),
            None => None,
        };

        let event = EventRecord {
            id: None,
            title: data.title,
            description: data.description,
            category,
            event_date: data.event_date,
            start_time: data.start_time,
            end_time: data.end_time,
            location: data.location,
            image_url: data.image_url,
            ticket_price: data.ticket_price,
            max_attendees: data.max_attendees,
            current_attendees: 0,
            is_published: data.is_published.unwrap_or(false),
        };

        let created: Option<EventRecord> =
            self.base.db().create(EVENT_TABLE).content(event).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create event".to_string()))
    }

    /// Update an event (partial merge)
    pub async fn update(&self, id: &str, data: EventUpdate) -> RepoResult<EventRecord> {
        let record_id = parse_record_id(EVENT_TABLE, id)?;

        if let Some(price) = data.ticket_price
            && (price < 0.0 || !price.is_finite())
        {
            return Err(RepoError::Validation(format!(
                "ticket_price must be non-negative, got {}",
                price
            )));
        }
        if let Some(ref c) = data.category {
            parse_record_id(CATEGORY_TABLE, c)?;
        }

        let merge = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $id MERGE $data RETURN AFTER")
            .bind(("id", record_id))
            .bind(("data", merge))
            .await?;
        let events: Vec<EventRecord> = result.take(0)?;
        events
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))
    }

    /// Hard delete an event
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(EVENT_TABLE, id)?;
        let deleted: Option<EventRecord> = self.base.db().delete(record_id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Event {} not found", id)));
        }
        Ok(())
    }

    /// Atomically add `quantity` to the attendee count
    ///
    /// 自增在数据库内完成（`current_attendees += $qty`），并发确认不会
    /// 互相覆盖计数。
    pub async fn add_attendees(
        &self,
        id: &surrealdb::RecordId,
        quantity: i32,
    ) -> RepoResult<EventRecord> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET current_attendees += $qty RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("qty", quantity))
            .await?;
        let events: Vec<EventRecord> = result.take(0)?;
        events
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))
    }

    // ==================== Categories ====================

    pub async fn find_categories(&self) -> RepoResult<Vec<EventCategoryRecord>> {
        let categories: Vec<EventCategoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM event_category ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn create_category(
        &self,
        data: EventCategoryCreate,
    ) -> RepoResult<EventCategoryRecord> {
        let category = EventCategoryRecord {
            id: None,
            name: data.name,
            color: data.color,
            sort_order: data.sort_order.unwrap_or(0),
        };
        let created: Option<EventCategoryRecord> = self
            .base
            .db()
            .create(CATEGORY_TABLE)
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create event category".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> EventRepository {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();
        EventRepository::new(service.db)
    }

    pub fn event(title: &str, price: f64, capacity: i32, published: bool) -> EventCreate {
        EventCreate {
            title: title.to_string(),
            description: "A cupping session".to_string(),
            category: None,
            event_date: "2026-10-01".to_string(),
            start_time: "18:30".to_string(),
            end_time: None,
            location: None,
            image_url: None,
            ticket_price: price,
            max_attendees: capacity,
            is_published: Some(published),
        }
    }

    #[tokio::test]
    async fn test_published_filter() {
        let repo = repo().await;
        repo.create(event("Public", 5.0, 20, true)).await.unwrap();
        repo.create(event("Draft", 5.0, 20, false)).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        let published = repo.find_published().await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Public");
    }

    #[tokio::test]
    async fn test_add_attendees_is_incremental() {
        let repo = repo().await;
        let created = repo.create(event("Tasting", 5.0, 10, true)).await.unwrap();
        let id = created.id.clone().unwrap();

        let after = repo.add_attendees(&id, 3).await.unwrap();
        assert_eq!(after.current_attendees, 3);
        // 第二次确认在既有计数上累加，而非覆盖
        let after = repo.add_attendees(&id, 2).await.unwrap();
        assert_eq!(after.current_attendees, 5);
        assert_eq!(after.remaining_capacity(), 5);
    }
}
