//! Messages API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::MessageRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text, validate_required_text,
};
use shared::models::{Message, MessageSubmission};
use shared::{ApiResponse, AppResult};

/// POST /api/messages - 联系表单提交
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MessageSubmission>,
) -> AppResult<Json<ApiResponse<Message>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_optional_text(&payload.subject, "subject", MAX_NAME_LEN)?;
    validate_required_text(&payload.body, "message", MAX_NOTE_LEN)?;

    let repo = MessageRepository::new(state.get_db());
    let message = repo.create(payload).await?;
    Ok(Json(ApiResponse::success(message.into())))
}

/// GET /api/messages - 后台收件箱
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Message>>>> {
    let repo = MessageRepository::new(state.get_db());
    let messages = repo.find_all().await?;
    Ok(Json(ApiResponse::success(
        messages.into_iter().map(Into::into).collect(),
    )))
}

/// PUT /api/messages/:id - 标记已读
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Message>>> {
    let repo = MessageRepository::new(state.get_db());
    let message = repo.mark_read(&id).await?;
    Ok(Json(ApiResponse::success(message.into())))
}

/// DELETE /api/messages/:id - 删除留言
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = MessageRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok()))
}
