//! Contact API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{ContactCreate, ContactMessage};
use crate::db::repository::ContactRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppResult, Envelope, created, ok};

/// Empty payload; the envelope carries only `success` and `message`
#[derive(Serialize)]
pub struct EmptyPayload {}

/// `{success, messages}`
#[derive(Serialize)]
pub struct MessagesPayload {
    pub messages: Vec<ContactMessage>,
}

/// POST /api/contact - 提交联系表单
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<ContactCreate>,
) -> AppResult<(StatusCode, Json<Envelope<EmptyPayload>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_required_text(&payload.subject, "subject", MAX_NAME_LEN)?;
    validate_required_text(&payload.message, "message", MAX_NOTE_LEN)?;

    let repo = ContactRepository::new(state.db.clone());
    repo.create(payload).await?;

    Ok(created(
        EmptyPayload {},
        "Message sent successfully! We will get back to you soon.",
    ))
}

/// GET /api/contact - 全部留言 (admin)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<Envelope<MessagesPayload>>> {
    let repo = ContactRepository::new(state.db.clone());
    let messages = repo.find_all().await?;
    Ok(ok(MessagesPayload { messages }))
}
