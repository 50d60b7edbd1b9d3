//! 认证模块
//!
//! JWT 生成/验证 + 路由级认证中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_admin};
