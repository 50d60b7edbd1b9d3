//! Blog Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::blog::slugify;
use crate::db::models::{
    BlogCategoryCreate, BlogCategoryRecord, BlogPostCreate, BlogPostRecord, BlogPostUpdate,
};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const POST_TABLE: &str = "blog_post";
const CATEGORY_TABLE: &str = "blog_category";

#[derive(Clone)]
pub struct BlogRepository {
    base: BaseRepository,
}

impl BlogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All posts, newest first (back-office view)
    pub async fn find_all(&self) -> RepoResult<Vec<BlogPostRecord>> {
        let posts: Vec<BlogPostRecord> = self
            .base
            .db()
            .query("SELECT * FROM blog_post ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Published posts only, newest published first (storefront view)
    pub async fn find_published(&self) -> RepoResult<Vec<BlogPostRecord>> {
        let posts: Vec<BlogPostRecord> = self
            .base
            .db()
            .query("SELECT * FROM blog_post WHERE is_published = true ORDER BY published_at DESC")
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Create a new post; slug derives from the title when not supplied
    pub async fn create_post(&self, data: BlogPostCreate) -> RepoResult<BlogPostRecord> {
        let slug = data
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slugify(&data.title));

        let category = match data.category {
            Some(ref c) => Some(parse_record_id(CATEGORY_TABLE, c)?),
            None => None,
        };

        let is_published = data.is_published.unwrap_or(false);
        let now = now_millis();
        let post = BlogPostRecord {
            id: None,
            title: data.title,
            slug,
            excerpt: data.excerpt,
            content: data.content,
            category,
            image_url: data.image_url,
            author: data.author,
            is_published,
            published_at: is_published.then_some(now),
            created_at: now,
            updated_at: now,
        };

        let created: Option<BlogPostRecord> = self
            .base
            .db()
            .create(POST_TABLE)
            .content(post)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("uniq_post_slug") {
                    RepoError::Duplicate("Blog slug already exists".to_string())
                } else {
                    RepoError::Database(msg)
                }
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create blog post".to_string()))
    }

    /// Update a post (partial merge); publishing stamps `published_at`
    pub async fn update_post(&self, id: &str, data: BlogPostUpdate) -> RepoResult<BlogPostRecord> {
        let record_id = parse_record_id(POST_TABLE, id)?;

        if let Some(ref c) = data.category {
            parse_record_id(CATEGORY_TABLE, c)?;
        }

        let current = self
            .base
            .db()
            .select::<Option<BlogPostRecord>>(record_id.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Blog post {} not found", id)))?;

        let mut merge = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {}", e)))?;

        let map = merge.as_object_mut().expect("update serializes to object");
        map.insert("updated_at".to_string(), now_millis().into());
        // 首次发布时打上发布时间戳
        if data.is_published == Some(true) && current.published_at.is_none() {
            map.insert("published_at".to_string(), now_millis().into());
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $id MERGE $data RETURN AFTER")
            .bind(("id", record_id))
            .bind(("data", merge))
            .await?;
        let posts: Vec<BlogPostRecord> = result.take(0)?;
        posts
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Blog post {} not found", id)))
    }

    /// Hard delete a post
    pub async fn delete_post(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(POST_TABLE, id)?;
        let deleted: Option<BlogPostRecord> = self.base.db().delete(record_id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Blog post {} not found", id)));
        }
        Ok(())
    }

    // ==================== Categories ====================

    pub async fn find_categories(&self) -> RepoResult<Vec<BlogCategoryRecord>> {
        let categories: Vec<BlogCategoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM blog_category ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn create_category(
        &self,
        data: BlogCategoryCreate,
    ) -> RepoResult<BlogCategoryRecord> {
        let slug = data
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slugify(&data.name));
        let category = BlogCategoryRecord {
            id: None,
            name: data.name,
            slug,
            sort_order: data.sort_order.unwrap_or(0),
        };
        let created: Option<BlogCategoryRecord> = self
            .base
            .db()
            .create(CATEGORY_TABLE)
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create blog category".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> BlogRepository {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();
        BlogRepository::new(service.db)
    }

    fn post(title: &str, published: bool) -> BlogPostCreate {
        BlogPostCreate {
            title: title.to_string(),
            slug: None,
            excerpt: None,
            content: "Body".to_string(),
            category: None,
            image_url: None,
            author: "Sam".to_string(),
            is_published: Some(published),
        }
    }

    #[tokio::test]
    async fn test_slug_derived_from_title() {
        let repo = repo().await;
        let created = repo.create_post(post("Latte Art Basics", true)).await.unwrap();
        assert_eq!(created.slug, "latte-art-basics");
        assert!(created.published_at.is_some());
    }

    #[tokio::test]
    async fn test_draft_hidden_from_storefront() {
        let repo = repo().await;
        repo.create_post(post("Draft post", false)).await.unwrap();
        repo.create_post(post("Public post", true)).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        let published = repo.find_published().await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Public post");
    }

    #[tokio::test]
    async fn test_publish_stamps_timestamp() {
        let repo = repo().await;
        let created = repo.create_post(post("Draft", false)).await.unwrap();
        assert!(created.published_at.is_none());
        let id = created.id.as_ref().unwrap().to_string();

        let updated = repo
            .update_post(
                &id,
                BlogPostUpdate {
                    title: None,
                    slug: None,
                    excerpt: None,
                    content: None,
                    category: None,
                    image_url: None,
                    is_published: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(updated.is_published);
        assert!(updated.published_at.is_some());
    }
}
