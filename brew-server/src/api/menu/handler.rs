//! Menu API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{BulkAvailabilityUpdate, MenuCategoryCreate, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::{MenuCategoryRepository, MenuItemRepository};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use shared::models::{MenuCategory, MenuItem};
use shared::{ApiResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    /// 后台列表带上不可售商品
    #[serde(default)]
    pub include_unavailable: bool,
}

/// GET /api/menu/items - 菜单列表
///
/// 门店只看到可售商品；管理员可带 `?include_unavailable=true`。
pub async fn list_items(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListItemsQuery>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = if query.include_unavailable && user.is_some() {
        repo.find_all().await?
    } else {
        repo.find_available().await?
    };
    Ok(Json(ApiResponse::success(
        items.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/menu/categories - 分类列表
pub async fn list_categories(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<MenuCategory>>>> {
    let repo = MenuCategoryRepository::new(state.get_db());
    let categories = repo.find_all().await?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/menu/items - 新建商品
pub async fn create_item(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(payload).await?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// PUT /api/menu/items/:id - 更新商品
pub async fn update_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&id, payload).await?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// DELETE /api/menu/items/:id - 删除商品
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/menu/items/bulk-availability - 批量上下架
pub async fn bulk_availability(
    State(state): State<ServerState>,
    Json(payload): Json<BulkAvailabilityUpdate>,
) -> AppResult<Json<ApiResponse<usize>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let updated = repo.bulk_update_availability(&payload).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// POST /api/menu/categories - 新建分类
pub async fn create_category(
    State(state): State<ServerState>,
    Json(payload): Json<MenuCategoryCreate>,
) -> AppResult<Json<ApiResponse<MenuCategory>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = MenuCategoryRepository::new(state.get_db());
    let category = repo.create(payload).await?;
    Ok(Json(ApiResponse::success(category.into())))
}
