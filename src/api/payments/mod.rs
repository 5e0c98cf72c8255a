//! Payment API Module
//!
//! Creation, transaction-status updates, and the read surface including the
//! orphaned-payment reconciliation listing.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all).post(handler::create))
        .route("/user/{user_id}", get(handler::list_by_user))
        // Checkout residue: payments whose order write never happened
        .route("/orphaned", get(handler::list_orphaned))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
}
