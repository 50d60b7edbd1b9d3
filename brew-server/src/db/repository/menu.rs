//! Menu Repositories

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{
    BulkAvailabilityUpdate, MenuCategoryCreate, MenuCategoryRecord, MenuItemCreate, MenuItemRecord,
    MenuItemUpdate,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ITEM_TABLE: &str = "menu_item";
const CATEGORY_TABLE: &str = "menu_category";

// =============================================================================
// Menu Category Repository
// =============================================================================

#[derive(Clone)]
pub struct MenuCategoryRepository {
    base: BaseRepository,
}

impl MenuCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active categories ordered for display
    pub async fn find_all(&self) -> RepoResult<Vec<MenuCategoryRecord>> {
        let categories: Vec<MenuCategoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM menu_category WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Create a new category; names are kept unique at the application level
    pub async fn create(&self, data: MenuCategoryCreate) -> RepoResult<MenuCategoryRecord> {
        let existing: Vec<MenuCategoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM menu_category WHERE name = $name")
            .bind(("name", data.name.clone()))
            .await?
            .take(0)?;
        if !existing.is_empty() {
            return Err(RepoError::Duplicate(format!(
                "Menu category '{}' already exists",
                data.name
            )));
        }

        let category = MenuCategoryRecord {
            id: None,
            name: data.name,
            description: data.description,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };

        let created: Option<MenuCategoryRecord> = self
            .base
            .db()
            .create(CATEGORY_TABLE)
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu category".to_string()))
    }
}

// =============================================================================
// Menu Item Repository
// =============================================================================

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all items (back-office view)
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItemRecord>> {
        let items: Vec<MenuItemRecord> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find available items only (storefront view)
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItemRecord>> {
        let items: Vec<MenuItemRecord> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE is_available = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItemRecord>> {
        let record_id = parse_record_id(ITEM_TABLE, id)?;
        let item: Option<MenuItemRecord> = self.base.db().select(record_id).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItemRecord> {
        if data.price < 0.0 || !data.price.is_finite() {
            return Err(RepoError::Validation(format!(
                "price must be non-negative, got {}",
                data.price
            )));
        }

        let category = match data.category {
            Some(ref c) => Some(parse_record_id(CATEGORY_TABLE, c)?),
            None => None,
        };

        let item = MenuItemRecord {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category,
            image_url: data.image_url,
            is_available: data.is_available.unwrap_or(true),
            is_featured: data.is_featured.unwrap_or(false),
            sort_order: data.sort_order.unwrap_or(0),
            tags: data.tags,
        };

        let created: Option<MenuItemRecord> =
            self.base.db().create(ITEM_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item (partial merge)
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItemRecord> {
        let record_id = parse_record_id(ITEM_TABLE, id)?;

        if let Some(price) = data.price
            && (price < 0.0 || !price.is_finite())
        {
            return Err(RepoError::Validation(format!(
                "price must be non-negative, got {}",
                price
            )));
        }
        // 引用字段校验格式后按字符串合入
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
        let items: Vec<MenuItemRecord> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(ITEM_TABLE, id)?;
        let deleted: Option<MenuItemRecord> = self.base.db().delete(record_id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }
        Ok(())
    }

    /// Toggle availability for a batch of items, returning the updated count
    pub async fn bulk_update_availability(
        &self,
        data: &BulkAvailabilityUpdate,
    ) -> RepoResult<usize> {
        let mut updated = 0;
        for id in &data.ids {
            let record_id = parse_record_id(ITEM_TABLE, id)?;
            let mut result = self
                .base
                .db()
                .query("UPDATE $id SET is_available = $available RETURN AFTER")
                .bind(("id", record_id))
                .bind(("available", data.is_available))
                .await?;
            let items: Vec<MenuItemRecord> = result.take(0)?;
            updated += items.len();
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repos() -> (MenuCategoryRepository, MenuItemRepository) {
        let service = DbService::open_in_memory().await.unwrap();
        service.init_schema().await.unwrap();
        (
            MenuCategoryRepository::new(service.db.clone()),
            MenuItemRepository::new(service.db),
        )
    }

    fn item(name: &str, price: f64) -> MenuItemCreate {
        MenuItemCreate {
            name: name.to_string(),
            description: None,
            price,
            category: None,
            image_url: None,
            is_available: None,
            is_featured: None,
            sort_order: None,
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (_, items) = repos().await;
        items.create(item("Flat White", 3.40)).await.unwrap();
        items.create(item("Espresso", 2.20)).await.unwrap();

        assert_eq!(items.find_all().await.unwrap().len(), 2);
        assert_eq!(items.find_available().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let (_, items) = repos().await;
        assert!(matches!(
            items.create(item("Broken", -1.0)).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_merge() {
        let (_, items) = repos().await;
        let created = items.create(item("Mocha", 3.80)).await.unwrap();
        let id = created.id.as_ref().unwrap().to_string();

        let updated = items
            .update(
                &id,
                MenuItemUpdate {
                    name: None,
                    description: None,
                    price: Some(4.00),
                    category: None,
                    image_url: None,
                    is_available: Some(false),
                    is_featured: None,
                    sort_order: None,
                    tags: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 4.00);
        assert!(!updated.is_available);
        // Untouched fields survive the merge
        assert_eq!(updated.name, "Mocha");
        assert!(items.find_available().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_availability() {
        let (_, items) = repos().await;
        let a = items.create(item("A", 1.0)).await.unwrap();
        let b = items.create(item("B", 2.0)).await.unwrap();

        let updated = items
            .bulk_update_availability(&BulkAvailabilityUpdate {
                ids: vec![
                    a.id.as_ref().unwrap().to_string(),
                    b.id.as_ref().unwrap().to_string(),
                ],
                is_available: false,
            })
            .await
            .unwrap();

        assert_eq!(updated, 2);
        assert!(items.find_available().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_category_rejected() {
        let (categories, _) = repos().await;
        categories
            .create(MenuCategoryCreate {
                name: "Coffee".to_string(),
                description: None,
                sort_order: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            categories
                .create(MenuCategoryCreate {
                    name: "Coffee".to_string(),
                    description: None,
                    sort_order: None,
                })
                .await,
            Err(RepoError::Duplicate(_))
        ));
    }
}
