//! Public Content API Handlers
//!
//! 门店首页一次拉取全部已发布内容：按分类分组的菜单、
//! 已发布活动与文章。

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::{BlogRepository, EventRepository, MenuCategoryRepository, MenuItemRepository};
use shared::client::PublicContent;
use shared::models::{MenuItem, MenuSection};
use shared::{ApiResponse, AppResult};

/// GET /api/public/content - 门店聚合内容
pub async fn content(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<PublicContent>>> {
    let db = state.get_db();

    let categories = MenuCategoryRepository::new(db.clone()).find_all().await?;
    let items = MenuItemRepository::new(db.clone()).find_available().await?;
    let events = EventRepository::new(db.clone()).find_published().await?;
    let posts = BlogRepository::new(db).find_published().await?;

    // 按分类分组；未挂分类的商品不进入门店聚合
    let items: Vec<MenuItem> = items.into_iter().map(Into::into).collect();
    let menu = categories
        .into_iter()
        .map(|record| {
            let category: shared::models::MenuCategory = record.into();
            let items = items
                .iter()
                .filter(|item| item.category.as_deref() == Some(category.id.as_str()))
                .cloned()
                .collect();
            MenuSection { category, items }
        })
        .collect();

    Ok(Json(ApiResponse::success(PublicContent {
        menu,
        events: events.into_iter().map(Into::into).collect(),
        posts: posts.into_iter().map(Into::into).collect(),
    })))
}
