//! Handlers for override-price approval requests.
//!
//! Requests are an independent audit trail: resolving one never writes back
//! to the opportunity it snapshots, and resolution is single-shot.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use vector_core::error::CoreError;
use vector_core::opportunity::ApprovalStatus;
use vector_core::types::DbId;
use vector_db::models::override_price::{CreateOverridePrice, ResolveOverridePrice};
use vector_db::repositories::OverridePriceRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// GET /override-prices
///
/// List all approval requests, newest first.
pub async fn list_requests(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let requests = OverridePriceRepo::list(&state.pool).await?;
    Ok(Json(requests))
}

/// GET /opportunities/{id}/override-prices
///
/// List the approval requests raised against one opportunity.
pub async fn list_requests_for_opportunity(
    State(state): State<AppState>,
    Path(opportunity_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let requests =
        OverridePriceRepo::list_for_opportunity(&state.pool, opportunity_id).await?;
    Ok(Json(requests))
}

/// POST /override-prices
///
/// Raise an approval request directly (the entry form path; most requests
/// are raised automatically by the opportunity write trigger).
pub async fn create_request(
    State(state): State<AppState>,
    Json(input): Json<CreateOverridePrice>,
) -> AppResult<impl IntoResponse> {
    let request = OverridePriceRepo::create(&state.pool, &input).await?;
    tracing::info!(
        request_id = request.id,
        opportunity_id = request.opportunity_id,
        "Override price approval request created"
    );
    Ok((StatusCode::CREATED, Json(request)))
}

/// POST /override-prices/{id}/approve
pub async fn approve_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResolveOverridePrice>,
) -> AppResult<impl IntoResponse> {
    resolve(&state, id, ApprovalStatus::Approved, input).await
}

/// POST /override-prices/{id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResolveOverridePrice>,
) -> AppResult<impl IntoResponse> {
    resolve(&state, id, ApprovalStatus::Rejected, input).await
}

/// Shared approve/reject path.
///
/// The repository only transitions rows that are still `Pending`; when that
/// misses, a lookup distinguishes "never existed" from "already resolved".
async fn resolve(
    state: &AppState,
    id: DbId,
    status: ApprovalStatus,
    input: ResolveOverridePrice,
) -> AppResult<impl IntoResponse> {
    let note = input
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("A resolution note is required".to_string()))?;

    if let Some(resolved) =
        OverridePriceRepo::resolve(&state.pool, id, status, note, Utc::now()).await?
    {
        tracing::info!(request_id = id, status = status.as_str(), "Override price request resolved");
        return Ok(Json(resolved));
    }

    match OverridePriceRepo::find_by_id(&state.pool, id).await? {
        Some(existing) => Err(AppError::Core(CoreError::Conflict(format!(
            "Request {id} is already {}",
            existing.status
        )))),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "OverridePriceRequest",
            id,
        })),
    }
}
