//! Order API Module
//!
//! Creation, status transitions, cancellation, and the read surface
//! (by user / by id / admin listing).

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all).post(handler::create))
        .route("/user/{user_id}", get(handler::list_by_user))
        .route("/{id}", get(handler::get_by_id).delete(handler::cancel))
        .route("/{id}/status", patch(handler::update_status))
}
