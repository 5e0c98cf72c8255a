//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录接口
//! - [`products`] - 商品目录接口
//! - [`contact`] - 联系表单接口
//! - [`orders`] - 订单接口
//! - [`payments`] - 支付接口

pub mod auth;
pub mod contact;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Assemble the full application router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(contact::router())
        .merge(orders::router())
        .merge(payments::router())
}
