//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`Envelope`] - API 响应结构
//!
//! # 错误映射
//!
//! | 变体 | HTTP | 说明 |
//! |------|------|------|
//! | Validation | 400 | 字段缺失/非法枚举/数量越界 |
//! | InvalidTransition | 400 | 状态机拒绝的迁移 |
//! | NotFound | 404 | 资源不存在 |
//! | Conflict | 409 | 唯一索引冲突 (订单号/交易号/邮箱) |
//! | Database | 500 | 存储层错误 (仅服务端记录详情) |
//! | Internal | 500 | 其他内部错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order not found"))
//!
//! // 返回成功响应
//! Ok(Json(ok(OrderPayload { order })))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API 统一响应结构
///
/// ```json
/// { "success": true, "message": "Order created successfully", "order": { ... } }
/// ```
///
/// The payload struct is flattened into the envelope, so each endpoint keeps
/// its named key (`order`, `orders`, `payment`, ...).
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Invalid transition: {0}")]
    /// 非法状态迁移 (400)
    InvalidTransition(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Conflict: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

/// 错误响应体 `{success: false, message}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),

            // 存储/内部错误：详情只进日志，不回给调用方
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::InvalidTransition(msg) => AppError::InvalidTransition(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid credentials error with unified message
    /// Used to prevent email enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::Validation("Invalid email or password".to_string())
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response (200)
pub fn ok<T: Serialize>(payload: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: None,
        payload,
    })
}

/// Create a successful response with custom message (200)
pub fn ok_with_message<T: Serialize>(
    payload: T,
    message: impl Into<String>,
) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: Some(message.into()),
        payload,
    })
}

/// Create a 201 Created response with message
pub fn created<T: Serialize>(
    payload: T,
    message: impl Into<String>,
) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            message: Some(message.into()),
            payload,
        }),
    )
}
