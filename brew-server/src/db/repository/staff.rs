//! Staff Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::Staff;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Look up an account by username (login)
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Staff>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let staff: Option<Staff> = result.take(0)?;
        Ok(staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::util::now_millis;

    #[tokio::test]
    async fn test_find_by_username() {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();

        let staff = Staff {
            id: None,
            username: "admin".to_string(),
            display_name: "Admin".to_string(),
            hash_pass: Staff::hash_password("secret").unwrap(),
            role: "admin".to_string(),
            is_active: true,
            created_at: now_millis(),
        };
        let _: Option<Staff> = service.db.create("staff").content(staff).await.unwrap();

        let repo = StaffRepository::new(service.db);
        assert!(repo.find_by_username("admin").await.unwrap().is_some());
        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
    }
}
