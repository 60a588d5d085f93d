//! Handlers for active user accounts and the pending-registration queue.
//!
//! Self-registered users land in the staging table via the pending upsert
//! and only become active accounts when an admin approves them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use vector_db::models::user::{ApprovePendingUser, CreateUser, UpdateUser};
use vector_db::repositories::{PendingUserRepo, UpsertOutcome, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::{ExistsResponse, OkResponse, UpsertResponse};
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Query parameters
   -------------------------------------------------------------------------- */

/// Email query parameter for the lookup endpoints.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Reject registrations missing any of the required identity fields.
fn require_identity(first_name: &str, last_name: &str, email: &str) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if first_name.trim().is_empty() {
        missing.push("firstName");
    }
    if last_name.trim().is_empty() {
        missing.push("lastName");
    }
    if email.trim().is_empty() {
        missing.push("email");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/* --------------------------------------------------------------------------
   Active accounts
   -------------------------------------------------------------------------- */

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// POST /users
///
/// Create an active user directly (admin path, bypasses the pending queue).
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    require_identity(&input.first_name, &input.last_name, &input.email)?;

    UserRepo::create(&state.pool, &input).await?;
    tracing::info!(email = %input.email, "User created");
    Ok((StatusCode::CREATED, Json(OkResponse::new())))
}

/// PUT /users/{email}
///
/// Update an active user's name and role flags, keyed by email.
pub async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    require_identity(&input.first_name, &input.last_name, &email)?;

    if !UserRepo::update_by_email(&state.pool, &email, &input).await? {
        return Err(AppError::NotFound(format!("No user with email {email}")));
    }
    Ok(Json(OkResponse::new()))
}

/// GET /users/exists?email=
pub async fn user_exists(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<impl IntoResponse> {
    let exists = UserRepo::exists(&state.pool, &query.email).await?;
    Ok(Json(ExistsResponse { exists }))
}

/// GET /users/by-email?email=
///
/// Profile lookup for the login flow: `{ "user": null }` when no account
/// matches, so the client can branch without handling a 404.
pub async fn user_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &query.email).await?;
    Ok(Json(json!({ "user": user })))
}

/* --------------------------------------------------------------------------
   Pending registrations
   -------------------------------------------------------------------------- */

/// GET /users/pending
pub async fn list_pending_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pending = PendingUserRepo::list(&state.pool).await?;
    Ok(Json(pending))
}

/// POST /users/pending
///
/// Register (or re-register) a pending user. Re-registration with the same
/// email replaces the staged details, so the latest submission wins.
pub async fn register_pending_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    require_identity(&input.first_name, &input.last_name, &input.email)?;

    let outcome = PendingUserRepo::upsert(&state.pool, &input).await?;
    tracing::info!(email = %input.email, action = outcome.as_str(), "Pending user registered");

    let status = match outcome {
        UpsertOutcome::Inserted => StatusCode::CREATED,
        UpsertOutcome::Updated => StatusCode::OK,
    };
    Ok((
        status,
        Json(UpsertResponse {
            ok: true,
            action: outcome.as_str(),
        }),
    ))
}

/// DELETE /users/pending/{email}
///
/// Reject a pending registration.
pub async fn reject_pending_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !PendingUserRepo::delete_by_email(&state.pool, &email).await? {
        return Err(AppError::NotFound(format!(
            "No pending registration for {email}"
        )));
    }
    tracing::info!(email = %email, "Pending user rejected");
    Ok(Json(OkResponse::new()))
}

/// POST /users/pending/approve
///
/// Approve a pending registration with the granted role flags. The copy
/// into the active table and the removal of the staged row commit together.
pub async fn approve_pending_user(
    State(state): State<AppState>,
    Json(input): Json<ApprovePendingUser>,
) -> AppResult<impl IntoResponse> {
    if input.email.trim().is_empty() {
        return Err(AppError::BadRequest("Missing required fields: email".to_string()));
    }

    let approved = PendingUserRepo::approve(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No pending registration for {}", input.email))
        })?;

    tracing::info!(email = %approved.email, "Pending user approved");
    Ok((StatusCode::CREATED, Json(approved)))
}
