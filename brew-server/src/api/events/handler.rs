//! Events API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{EventCategoryCreate, EventCreate, EventUpdate};
use crate::db::repository::EventRepository;
use crate::utils::time::{parse_date, parse_time};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use shared::models::{Event, EventCategory};
use shared::{ApiResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 后台列表带上未发布活动
    #[serde(default)]
    pub include_drafts: bool,
}

/// GET /api/events - 活动列表
///
/// 门店只看到已发布活动；管理员可带 `?include_drafts=true`。
pub async fn list(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Event>>>> {
    let repo = EventRepository::new(state.get_db());
    let events = if query.include_drafts && user.is_some() {
        repo.find_all().await?
    } else {
        repo.find_published().await?
    };
    Ok(Json(ApiResponse::success(
        events.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/events/categories - 活动分类列表
pub async fn list_categories(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<EventCategory>>>> {
    let repo = EventRepository::new(state.get_db());
    let categories = repo.find_categories().await?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/events - 新建活动
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<Json<ApiResponse<Event>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    parse_date(&payload.event_date)?;
    parse_time(&payload.start_time)?;
    if let Some(ref end) = payload.end_time {
        parse_time(end)?;
    }

    let repo = EventRepository::new(state.get_db());
    let event = repo.create(payload).await?;
    Ok(Json(ApiResponse::success(event.into())))
}

/// PUT /api/events/:id - 更新活动
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EventUpdate>,
) -> AppResult<Json<ApiResponse<Event>>> {
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(ref date) = payload.event_date {
        parse_date(date)?;
    }
    if let Some(ref time) = payload.start_time {
        parse_time(time)?;
    }

    let repo = EventRepository::new(state.get_db());
    let event = repo.update(&id, payload).await?;
    Ok(Json(ApiResponse::success(event.into())))
}

/// DELETE /api/events/:id - 删除活动
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = EventRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/events/categories - 新建活动分类
pub async fn create_category(
    State(state): State<ServerState>,
    Json(payload): Json<EventCategoryCreate>,
) -> AppResult<Json<ApiResponse<EventCategory>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = EventRepository::new(state.get_db());
    let category = repo.create_category(payload).await?;
    Ok(Json(ApiResponse::success(category.into())))
}
