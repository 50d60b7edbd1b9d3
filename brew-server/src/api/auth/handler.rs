//! Authentication Handlers
//!
//! Handles back-office login and current-user lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::StaffRepository;
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::{ApiResponse, AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login - 后台登录
///
/// Authenticates staff credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // 统一错误信息，防止用户名枚举
    let staff = match staff {
        Some(s) => {
            if !s.is_active {
                return Err(AppError::new(shared::ErrorCode::AccountDisabled));
            }

            let password_valid = s
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            s
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.get_jwt_service();
    let user_id = staff.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = jwt_service
        .generate_token(&user_id, &staff.username, &staff.display_name, &staff.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        username = %staff.username,
        "Staff logged in successfully"
    );

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        user: staff.into(),
    })))
}

/// GET /api/auth/me - 当前登录用户
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    // 取最新账号状态 (角色/启用状态可能已被修改)
    let repo = StaffRepository::new(state.get_db());
    let staff = repo
        .find_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::not_found("Staff account"))?;

    Ok(Json(ApiResponse::success(staff.into())))
}
