//! Route definitions for override-price approval requests, mounted at
//! `/override-prices`.
//!
//! The per-opportunity listing lives under `/opportunities/{id}` in the
//! opportunity router.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::override_price;
use crate::state::AppState;

/// ```text
/// GET  /               -> list_requests
/// POST /               -> create_request
/// POST /{id}/approve   -> approve_request
/// POST /{id}/reject    -> reject_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(override_price::list_requests).post(override_price::create_request),
        )
        .route("/{id}/approve", post(override_price::approve_request))
        .route("/{id}/reject", post(override_price::reject_request))
}
