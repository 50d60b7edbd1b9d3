//! Database Module
//!
//! 嵌入式 SurrealDB：RocksDB 持久化引擎，测试场景使用内存引擎。
//! 表结构定义与种子数据在启动时幂等执行。

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::Config;
use crate::db::models::Staff;
use shared::{AppError, AppResult};

const NAMESPACE: &str = "brew";
const DATABASE: &str = "brew";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the persistent database at the given path (RocksDB engine)
    pub async fn open(db_path: &str) -> AppResult<Self> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        tracing::info!("Database opened at {}", db_path);
        Ok(Self { db })
    }

    /// Open an in-memory database (tests)
    pub async fn open_in_memory() -> AppResult<Self> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;
        Ok(Self { db })
    }

    /// 幂等建表：表 + 唯一索引
    ///
    /// SurrealDB 是 schemaless 的，这里只声明表存在并建立
    /// 唯一约束（员工用户名、支付意向 ID、博客 slug）。
    pub async fn init_schema(&self) -> AppResult<()> {
        const SCHEMA: &str = "
            DEFINE TABLE IF NOT EXISTS menu_category SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS event_category SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS event SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS ticket_sale SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS blog_category SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS blog_post SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS message SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS staff SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS counter SCHEMALESS;

            DEFINE INDEX IF NOT EXISTS uniq_staff_username ON staff FIELDS username UNIQUE;
            DEFINE INDEX IF NOT EXISTS uniq_sale_intent ON ticket_sale FIELDS payment_intent_id UNIQUE;
            DEFINE INDEX IF NOT EXISTS uniq_post_slug ON blog_post FIELDS slug UNIQUE;
        ";

        self.db
            .query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {}", e)))?;

        tracing::info!("Database schema applied");
        Ok(())
    }

    /// 种子数据：管理员账号 (+ 开发环境演示数据)
    ///
    /// 幂等：staff 表非空则不再写入。
    pub async fn seed(&self, config: &Config) -> AppResult<()> {
        if self.count("staff").await? > 0 {
            return Ok(());
        }

        let password = match (&config.admin_password, config.is_production()) {
            (Some(p), _) => p.clone(),
            (None, false) => {
                tracing::warn!("ADMIN_PASSWORD not set, seeding default development password");
                "admin123".to_string()
            }
            (None, true) => {
                tracing::warn!("ADMIN_PASSWORD not set in production, no admin account seeded");
                return Ok(());
            }
        };

        let hash = Staff::hash_password(&password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {}", e)))?;

        let admin = Staff {
            id: None,
            username: "admin".to_string(),
            display_name: "Shop Admin".to_string(),
            hash_pass: hash,
            role: "admin".to_string(),
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        let _: Option<Staff> = self
            .db
            .create("staff")
            .content(admin)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed admin: {}", e)))?;
        tracing::info!("Seeded admin staff account");

        if config.is_development() {
            self.seed_demo_data().await?;
        }

        Ok(())
    }

    /// 开发环境演示数据：菜单、活动、博客各一组
    async fn seed_demo_data(&self) -> AppResult<()> {
        const DEMO: &str = "
            CREATE menu_category:coffee SET name = 'Coffee', description = 'Espresso-based drinks', sort_order = 0, is_active = true;
            CREATE menu_category:pastries SET name = 'Pastries', description = 'Baked every morning', sort_order = 1, is_active = true;

            CREATE menu_item SET name = 'Flat White', description = 'Double shot, silky milk', price = 3.40, category = menu_category:coffee, is_available = true, is_featured = true, sort_order = 0, tags = [];
            CREATE menu_item SET name = 'Espresso', description = 'House blend', price = 2.20, category = menu_category:coffee, is_available = true, is_featured = false, sort_order = 1, tags = [];
            CREATE menu_item SET name = 'Almond Croissant', price = 2.80, category = menu_category:pastries, is_available = true, is_featured = false, sort_order = 0, tags = ['vegetarian'];

            CREATE event_category:tastings SET name = 'Tastings', color = '#8b5e3c', sort_order = 0;
        ";

        self.db
            .query(DEMO)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed demo data: {}", e)))?;
        tracing::info!("Seeded development demo data");
        Ok(())
    }

    /// 统计表内记录数
    async fn count(&self, table: &str) -> AppResult<i64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }

        let mut result = self
            .db
            .query(format!("SELECT count() FROM {} GROUP ALL", table))
            .await
            .map_err(|e| AppError::database(format!("Count query failed: {}", e)))?;
        let row: Option<CountRow> = result
            .take(0)
            .map_err(|e| AppError::database(format!("Failed to parse count: {}", e)))?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
