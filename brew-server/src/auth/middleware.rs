//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use shared::AppError;

/// 门店公开路由判定
///
/// 公开路由无需令牌即可访问；其余 `/api/` 路由一律要求
/// `Authorization: Bearer <token>`。
///
/// | 方法 | 路径 | 说明 |
/// |------|------|------|
/// | POST | /api/auth/login | 后台登录 |
/// | GET  | /api/health | 健康检查 |
/// | GET  | /api/public/* | 门店聚合内容 |
/// | GET  | /api/menu/* | 菜单浏览 |
/// | GET  | /api/events, /api/events/categories | 活动浏览 |
/// | GET  | /api/blog/* | 博客浏览 |
/// | POST | /api/orders | 下单 |
/// | POST | /api/bookings | 订座 |
/// | POST | /api/messages | 联系表单 |
/// | POST | /api/tickets/payment-intent, /api/tickets/confirm | 购票流程 |
/// | POST | /api/tickets/sandbox/complete | 沙盒支付完成 (仅沙盒模式挂载) |
pub fn is_public_route(method: &http::Method, path: &str) -> bool {
    if method == http::Method::GET {
        return path == "/api/health"
            || path.starts_with("/api/public")
            || path.starts_with("/api/menu")
            || path == "/api/events"
            || path == "/api/events/categories"
            || path.starts_with("/api/blog");
    }

    if method == http::Method::POST {
        return path == "/api/auth/login"
            || path == "/api/orders"
            || path == "/api/bookings"
            || path == "/api/messages"
            || path == "/api/tickets/payment-intent"
            || path == "/api/tickets/confirm"
            || path == "/api/tickets/sandbox/complete";
    }

    false
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// 公开路由携带有效令牌时同样注入 CurrentUser，
/// 以便处理器区分门店访客与后台管理员 (如 `?include_drafts=true`)。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (静态文件、404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let public = is_public_route(req.method(), &path);

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| h.to_string());

    let token = match auth_header.as_deref() {
        Some(header) => match JwtService::extract_from_header(header) {
            Some(token) => Some(token.to_string()),
            None if public => None,
            None => return Err(AppError::invalid_token("Invalid authorization header")),
        },
        None => None,
    };

    let token = match token {
        Some(token) => token,
        None if public => return Ok(next.run(req).await),
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(&token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        // 公开路由上的坏令牌按访客处理
        Err(_) if public => Ok(next.run(req).await),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 管理员中间件 - 要求管理员角色
///
/// 检查 `CurrentUser.role == "admin"`
///
/// # 错误
///
/// 非管理员返回 403 Forbidden
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            username = user.username.clone(),
            user_role = user.role.clone()
        );
        return Err(AppError::new(shared::ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_public_get_routes() {
        assert!(is_public_route(&Method::GET, "/api/health"));
        assert!(is_public_route(&Method::GET, "/api/public/content"));
        assert!(is_public_route(&Method::GET, "/api/menu/items"));
        assert!(is_public_route(&Method::GET, "/api/menu/categories"));
        assert!(is_public_route(&Method::GET, "/api/events"));
        assert!(is_public_route(&Method::GET, "/api/blog/posts"));
    }

    #[test]
    fn test_public_post_routes() {
        assert!(is_public_route(&Method::POST, "/api/auth/login"));
        assert!(is_public_route(&Method::POST, "/api/orders"));
        assert!(is_public_route(&Method::POST, "/api/bookings"));
        assert!(is_public_route(&Method::POST, "/api/messages"));
        assert!(is_public_route(&Method::POST, "/api/tickets/payment-intent"));
        assert!(is_public_route(&Method::POST, "/api/tickets/confirm"));
    }

    #[test]
    fn test_admin_routes_not_public() {
        assert!(!is_public_route(&Method::GET, "/api/orders"));
        assert!(!is_public_route(&Method::GET, "/api/bookings"));
        assert!(!is_public_route(&Method::GET, "/api/tickets/sales"));
        assert!(!is_public_route(&Method::GET, "/api/messages"));
        assert!(!is_public_route(&Method::GET, "/api/statistics"));
        assert!(!is_public_route(&Method::POST, "/api/menu/items"));
        assert!(!is_public_route(&Method::PUT, "/api/orders/order:1/status"));
        assert!(!is_public_route(&Method::DELETE, "/api/blog/posts/blog_post:1"));
        assert!(!is_public_route(&Method::POST, "/api/upload/image"));
    }
}
