//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{
    AdminPayment, Payment, PaymentCreate, PaymentWithOrder, TransactionStatusUpdate,
};
use crate::db::repository::PaymentRepository;
use crate::utils::{AppError, AppResult, Envelope, created, ok, ok_with_message};

/// `{success, payment}`
#[derive(Serialize)]
pub struct PaymentPayload {
    pub payment: Payment,
}

/// `{success, payment}` with the order cross-link resolved
#[derive(Serialize)]
pub struct PaymentDetailPayload {
    pub payment: PaymentWithOrder,
}

/// `{success, payments}`
#[derive(Serialize)]
pub struct PaymentsPayload<T: Serialize> {
    pub payments: Vec<T>,
}

/// POST /api/payments - 创建支付 (模拟，本地完成)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<(StatusCode, Json<Envelope<PaymentPayload>>)> {
    let repo = PaymentRepository::new(state.db.clone());
    let payment = repo.create(payload).await?;

    tracing::info!(
        transaction_id = %payment.transaction_id,
        user_id = %payment.user_id,
        "Payment created"
    );

    Ok(created(
        PaymentPayload { payment },
        "Payment processed successfully",
    ))
}

/// GET /api/payments/user/:user_id - 用户支付列表 (订单已解析)
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Envelope<PaymentsPayload<PaymentWithOrder>>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo.find_by_user(&user_id).await?;
    Ok(ok(PaymentsPayload { payments }))
}

/// GET /api/payments/:id - 单个支付 (订单已解析)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<PaymentDetailPayload>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payment = repo
        .find_by_id_with_order(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment not found"))?;
    Ok(ok(PaymentDetailPayload { payment }))
}

/// PATCH /api/payments/:id/status - 交易状态更新 (经过迁移表)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionStatusUpdate>,
) -> AppResult<Json<Envelope<PaymentPayload>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payment = repo.update_status(&id, payload).await?;
    Ok(ok_with_message(
        PaymentPayload { payment },
        "Payment status updated",
    ))
}

/// GET /api/payments - 全部支付 (admin, userId 解析为展示投影)
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<Envelope<PaymentsPayload<AdminPayment>>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo.find_all_admin().await?;
    Ok(ok(PaymentsPayload { payments }))
}

/// GET /api/payments/orphaned - 无订单关联的支付 (对账视图)
pub async fn list_orphaned(
    State(state): State<ServerState>,
) -> AppResult<Json<Envelope<PaymentsPayload<Payment>>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo.find_orphaned().await?;
    Ok(ok(PaymentsPayload { payments }))
}
