//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 后台登录接口
//! - [`upload`] - 图片上传接口
//! - [`menu`] - 菜单管理接口
//! - [`events`] - 活动管理接口
//! - [`blog`] - 博客管理接口
//! - [`orders`] - 订单接口 (下单 + 状态看板)
//! - [`bookings`] - 订座接口
//! - [`tickets`] - 购票接口 (支付意向/确认/导出)
//! - [`messages`] - 联系表单接口
//! - [`public`] - 门店聚合内容接口
//! - [`statistics`] - 后台统计接口
//!
//! 每个接口都是独立的类型化操作：独立请求/响应结构，
//! 统一 `ApiResponse<T>` 信封（`code == 0` 即成功）。

pub mod auth;
pub mod health;
pub mod upload;

// Storefront / back-office APIs
pub mod blog;
pub mod bookings;
pub mod events;
pub mod menu;
pub mod messages;
pub mod orders;
pub mod public;
pub mod statistics;
pub mod tickets;

// Re-export common types for handlers
pub use shared::{ApiResponse, AppResult};
