//! Brew Server - 咖啡店线上门店与后台管理服务端
//!
//! # 架构概述
//!
//! 本模块是 Brew Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 + 仓储层
//! - **认证** (`auth`): JWT + Argon2 后台登录体系
//! - **支付** (`payments`): 卡支付处理商 REST 集成 (含沙盒模式)
//! - **购票** (`tickets`): 两段式支付意向/确认工作流
//! - **HTTP API** (`api`): 门店前台与后台管理接口
//!
//! # 模块结构
//!
//! ```text
//! brew-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── payments/      # 支付处理商集成
//! ├── tickets/       # 购票工作流
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod payments;
pub mod tickets;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use payments::{PaymentProvider, PaymentService};
pub use tickets::TicketService;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境：加载 .env、初始化日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____
   / __ )________ _      __
  / __  / ___/ _ \ | /| / /
 / /_/ / /  /  __/ |/ |/ /
/_____/_/   \___/|__/|__/
    "#
    );
}
