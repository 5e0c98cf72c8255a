//! Auth API 模块
//!
//! 注册/登录。无会话令牌，调用方自行保存返回的用户标识。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/signup", post(handler::signup))
        .route("/api/login", post(handler::login))
}
