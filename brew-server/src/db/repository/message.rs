//! Contact Message Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::MessageRecord;
use shared::models::MessageSubmission;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const MESSAGE_TABLE: &str = "message";

#[derive(Clone)]
pub struct MessageRepository {
    base: BaseRepository,
}

impl MessageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All messages, newest first (back-office inbox)
    pub async fn find_all(&self) -> RepoResult<Vec<MessageRecord>> {
        let messages: Vec<MessageRecord> = self
            .base
            .db()
            .query("SELECT * FROM message ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(messages)
    }

    /// Store a contact form submission
    pub async fn create(&self, data: MessageSubmission) -> RepoResult<MessageRecord> {
        let message = MessageRecord {
            id: None,
            name: data.name,
            email: data.email,
            subject: data.subject,
            body: data.body,
            is_read: false,
            created_at: now_millis(),
        };

        let created: Option<MessageRecord> =
            self.base.db().create(MESSAGE_TABLE).content(message).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create message".to_string()))
    }

    /// Mark a message as read
    pub async fn mark_read(&self, id: &str) -> RepoResult<MessageRecord> {
        let record_id = parse_record_id(MESSAGE_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET is_read = true RETURN AFTER")
            .bind(("id", record_id))
            .await?;
        let messages: Vec<MessageRecord> = result.take(0)?;
        messages
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Message {} not found", id)))
    }

    /// Hard delete a message
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(MESSAGE_TABLE, id)?;
        let deleted: Option<MessageRecord> = self.base.db().delete(record_id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Message {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_inbox_flow() {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();
        let repo = MessageRepository::new(service.db);

        let created = repo
            .create(MessageSubmission {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                subject: Some("Catering".to_string()),
                body: "Do you cater offices?".to_string(),
            })
            .await
            .unwrap();
        assert!(!created.is_read);

        let id = created.id.as_ref().unwrap().to_string();
        let read = repo.mark_read(&id).await.unwrap();
        assert!(read.is_read);

        repo.delete(&id).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
