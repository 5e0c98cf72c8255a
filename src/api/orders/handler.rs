//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{AdminOrder, Order, OrderCreate, OrderStatusUpdate, OrderWithPayment};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult, Envelope, created, ok, ok_with_message};

/// `{success, order}`
#[derive(Serialize)]
pub struct OrderPayload {
    pub order: Order,
}

/// `{success, order}` with the payment cross-link resolved
#[derive(Serialize)]
pub struct OrderDetailPayload {
    pub order: OrderWithPayment,
}

/// `{success, orders}`
#[derive(Serialize)]
pub struct OrdersPayload<T: Serialize> {
    pub orders: Vec<T>,
}

/// POST /api/orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Envelope<OrderPayload>>)> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(payload).await?;

    tracing::info!(
        order_number = %order.order_number,
        user_id = %order.user_id,
        "Order created"
    );

    Ok(created(
        OrderPayload { order },
        "Order created successfully",
    ))
}

/// GET /api/orders/user/:user_id - 用户订单列表 (支付已解析)
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Envelope<OrdersPayload<OrderWithPayment>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_user(&user_id).await?;
    Ok(ok(OrdersPayload { orders }))
}

/// GET /api/orders/:id - 单个订单 (支付已解析)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<OrderDetailPayload>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id_with_payment(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    Ok(ok(OrderDetailPayload { order }))
}

/// PATCH /api/orders/:id/status - 状态更新 (经过迁移表)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Envelope<OrderPayload>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update_status(&id, payload).await?;
    Ok(ok_with_message(
        OrderPayload { order },
        "Order updated successfully",
    ))
}

/// DELETE /api/orders/:id - 取消订单 (状态迁移，不删除记录)
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<OrderPayload>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.cancel(&id).await?;

    tracing::info!(order_number = %order.order_number, "Order cancelled");

    Ok(ok_with_message(
        OrderPayload { order },
        "Order cancelled successfully",
    ))
}

/// GET /api/orders - 全部订单 (admin, userId 解析为展示投影)
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<Envelope<OrdersPayload<AdminOrder>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all_admin().await?;
    Ok(ok(OrdersPayload { orders }))
}
