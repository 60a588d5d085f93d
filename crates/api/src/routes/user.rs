//! Route definitions for user accounts, mounted at `/users`.
//!
//! Static segments (`exists`, `by-email`, `pending`) are registered before
//! the `{email}` capture so axum matches them first.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// GET    /                   -> list_users
/// POST   /                   -> create_user
/// GET    /exists             -> user_exists
/// GET    /by-email           -> user_by_email
/// GET    /pending            -> list_pending_users
/// POST   /pending            -> register_pending_user
/// POST   /pending/approve    -> approve_pending_user
/// DELETE /pending/{email}    -> reject_pending_user
/// PUT    /{email}            -> update_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route("/exists", get(user::user_exists))
        .route("/by-email", get(user::user_by_email))
        .route(
            "/pending",
            get(user::list_pending_users).post(user::register_pending_user),
        )
        .route("/pending/approve", post(user::approve_pending_user))
        .route("/pending/{email}", delete(user::reject_pending_user))
        .route("/{email}", put(user::update_user))
}
