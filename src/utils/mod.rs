//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`Envelope`] - API 响应结构 `{success, message?, ...payload}`
//! - 日志、校验工具

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, Envelope};
pub use error::{created, ok, ok_with_message};

/// Current Unix timestamp in milliseconds.
///
/// 全栈统一使用 i64 Unix millis；repository 层不做时区转换。
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
