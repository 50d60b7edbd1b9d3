use std::path::PathBuf;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::payments::PaymentService;
use crate::tickets::TicketService;
use shared::AppResult;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | payments | PaymentService | 支付处理商 (真实 / 沙盒) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 支付服务
    pub payments: PaymentService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/brew.db) + 建表 + 种子数据
    /// 3. JWT 服务
    /// 4. 支付服务 (依据配置选择真实处理商或沙盒)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure().map_err(|e| {
            shared::AppError::with_message(
                shared::ErrorCode::ConfigError,
                format!("Failed to create work directory structure: {}", e),
            )
        })?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("brew.db");
        let db_service = DbService::open(&db_path.to_string_lossy()).await?;
        db_service.init_schema().await?;
        db_service.seed(config).await?;

        Self::with_db(config.clone(), db_service.db).await
    }

    /// 使用内存数据库初始化 (测试场景)
    ///
    /// 不触碰文件系统，支付强制走沙盒。
    pub async fn initialize_in_memory(config: &Config) -> AppResult<Self> {
        let db_service = DbService::open_in_memory().await?;
        db_service.init_schema().await?;
        db_service.seed(config).await?;

        Self::with_db(config.clone(), db_service.db).await
    }

    async fn with_db(config: Config, db: Surreal<Db>) -> AppResult<Self> {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let payments = PaymentService::from_config(&config);

        if payments.is_sandbox() && config.is_production() {
            tracing::warn!("⚠️  Payment keys missing or placeholder, sandbox payments in production!");
        }

        Ok(Self {
            config,
            db,
            jwt_service,
            payments,
        })
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 购票工作流服务 (无状态，按需构造)
    pub fn ticket_service(&self) -> TicketService {
        TicketService::new(
            self.db.clone(),
            self.payments.clone(),
            self.config.currency.clone(),
        )
    }
}
