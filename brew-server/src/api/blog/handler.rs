//! Blog API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{BlogCategoryCreate, BlogPostCreate, BlogPostUpdate};
use crate::db::repository::BlogRepository;
use crate::utils::validation::{MAX_CONTENT_LEN, MAX_NAME_LEN, validate_required_text};
use shared::models::{BlogCategory, BlogPost};
use shared::{ApiResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 后台列表带上草稿
    #[serde(default)]
    pub include_drafts: bool,
}

/// GET /api/blog/posts - 文章列表
///
/// 门店只看到已发布文章；管理员可带 `?include_drafts=true`。
pub async fn list_posts(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<BlogPost>>>> {
    let repo = BlogRepository::new(state.get_db());
    let posts = if query.include_drafts && user.is_some() {
        repo.find_all().await?
    } else {
        repo.find_published().await?
    };
    Ok(Json(ApiResponse::success(
        posts.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/blog/categories - 博客分类列表
pub async fn list_categories(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<BlogCategory>>>> {
    let repo = BlogRepository::new(state.get_db());
    let categories = repo.find_categories().await?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/blog/posts - 新建文章
pub async fn create_post(
    State(state): State<ServerState>,
    Json(payload): Json<BlogPostCreate>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.content, "content", MAX_CONTENT_LEN)?;
    validate_required_text(&payload.author, "author", MAX_NAME_LEN)?;

    let repo = BlogRepository::new(state.get_db());
    let post = repo.create_post(payload).await?;
    Ok(Json(ApiResponse::success(post.into())))
}

/// PUT /api/blog/posts/:id - 更新文章
pub async fn update_post(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BlogPostUpdate>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }

    let repo = BlogRepository::new(state.get_db());
    let post = repo.update_post(&id, payload).await?;
    Ok(Json(ApiResponse::success(post.into())))
}

/// DELETE /api/blog/posts/:id - 删除文章
pub async fn delete_post(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = BlogRepository::new(state.get_db());
    repo.delete_post(&id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/blog/categories - 新建博客分类
pub async fn create_category(
    State(state): State<ServerState>,
    Json(payload): Json<BlogCategoryCreate>,
) -> AppResult<Json<ApiResponse<BlogCategory>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = BlogRepository::new(state.get_db());
    let category = repo.create_category(payload).await?;
    Ok(Json(ApiResponse::success(category.into())))
}
