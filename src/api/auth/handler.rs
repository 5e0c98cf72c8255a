//! Auth API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{UserLogin, UserSignup};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, Envelope, created, ok_with_message};

/// Empty payload; the envelope carries only `success` and `message`
#[derive(Serialize)]
pub struct EmptyPayload {}

/// Login payload: the user projection, flattened into the envelope
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// POST /api/signup - 注册
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<UserSignup>,
) -> AppResult<(StatusCode, Json<Envelope<EmptyPayload>>)> {
    validate_required_text(&payload.full_name, "fullName", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;

    tracing::info!(email = %user.email, "Account created");

    Ok(created(EmptyPayload {}, "Account created"))
}

/// POST /api/login - 登录
///
/// 失败时统一返回同一条消息，避免枚举已注册邮箱。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<Envelope<LoginPayload>>> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("email and password are required"));
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let verified = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::invalid_credentials());
    }

    let id = user.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    Ok(ok_with_message(
        LoginPayload {
            id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
        },
        "Login successful!",
    ))
}
