//! Handlers for the sales opportunity pipeline.
//!
//! Covers CRUD, filtered search, bulk deletion, and the fiscal-period
//! volume-allocation views. Creation and update run the record through the
//! defaulting rules in `vector_core::opportunity` and may raise an
//! override-price approval request as a side effect.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use vector_core::error::CoreError;
use vector_core::fiscal::allocate_volume;
use vector_core::opportunity::{needs_price_approval, prepare_opportunity, OpportunityType};
use vector_core::types::DbId;
use vector_db::models::opportunity::{BulkDeleteRequest, Opportunity, OpportunitySearchFilters};
use vector_db::models::override_price::CreateOverridePrice;
use vector_db::repositories::{OpportunityRepo, OverridePriceRepo};

use crate::error::{AppError, AppResult};
use crate::payload::{AllocationPayload, OpportunityPayload};
use crate::response::OkResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// GET /opportunities
///
/// List all opportunities, newest first.
pub async fn list_opportunities(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let opportunities = OpportunityRepo::list(&state.pool).await?;
    Ok(Json(opportunities))
}

/// POST /opportunities
///
/// Create an opportunity. The payload is normalized, validated against the
/// composite business key, and run through the defaulting rules; the ID is
/// assigned inside the insert. An undercutting override price raises a
/// pending approval request.
pub async fn create_opportunity(
    State(state): State<AppState>,
    Json(payload): Json<OpportunityPayload>,
) -> AppResult<impl IntoResponse> {
    let prepared = prepare_opportunity(payload.into_draft(), Utc::now())?;
    let opportunity = OpportunityRepo::create(&state.pool, &prepared).await?;

    raise_approval_if_needed(&state, &opportunity).await?;

    tracing::info!(
        opportunity_id = opportunity.opportunity_id,
        customer = %opportunity.customer_name,
        "Opportunity created"
    );

    Ok((StatusCode::CREATED, Json(opportunity)))
}

/// GET /opportunities/{id}
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let opportunity = OpportunityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Opportunity",
            id,
        }))?;
    Ok(Json(opportunity))
}

/// PUT /opportunities/{id}
///
/// Full-record update through the same validation and defaulting path as
/// creation, including revenue recomputation and the approval trigger.
pub async fn update_opportunity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<OpportunityPayload>,
) -> AppResult<impl IntoResponse> {
    let prepared = prepare_opportunity(payload.into_draft(), Utc::now())?;
    let opportunity = OpportunityRepo::update(&state.pool, id, &prepared)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Opportunity",
            id,
        }))?;

    raise_approval_if_needed(&state, &opportunity).await?;

    Ok(Json(opportunity))
}

/// DELETE /opportunities/{id}
pub async fn delete_opportunity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !OpportunityRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Opportunity",
            id,
        }));
    }
    tracing::info!(opportunity_id = id, "Opportunity deleted");
    Ok(Json(OkResponse::new()))
}

/// POST /opportunities/bulk-delete
///
/// Delete a batch of opportunities by ID. Rejects an empty ID list.
pub async fn bulk_delete_opportunities(
    State(state): State<AppState>,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one opportunity ID is required".to_string(),
        ));
    }
    let deleted = OpportunityRepo::delete_many(&state.pool, &input.ids).await?;
    tracing::info!(requested = input.ids.len(), deleted, "Bulk opportunity delete");
    Ok(Json(OkResponse::new()))
}

/// GET /opportunities/search
///
/// Filtered search. At least one filter must be supplied.
pub async fn search_opportunities(
    State(state): State<AppState>,
    Query(filters): Query<OpportunitySearchFilters>,
) -> AppResult<impl IntoResponse> {
    if filters.is_empty() {
        return Err(AppError::BadRequest(
            "At least one search filter is required".to_string(),
        ));
    }
    let opportunities = OpportunityRepo::search(&state.pool, &filters).await?;
    Ok(Json(opportunities))
}

/// GET /opportunities/{id}/volume-allocation
///
/// Fiscal-period volume spread for a stored opportunity.
pub async fn volume_allocation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let opportunity = OpportunityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Opportunity",
            id,
        }))?;

    let allocation = allocate_volume(
        opportunity.estimated_volume.unwrap_or(0.0),
        opportunity.opportunity_type.as_deref().map(OpportunityType::parse),
        Some(opportunity.likely_start_date),
        opportunity.end_date,
    );
    Ok(Json(allocation))
}

/// POST /opportunities/volume-allocation
///
/// Stateless allocation preview for the entry form, before any row exists.
pub async fn preview_volume_allocation(
    Json(payload): Json<AllocationPayload>,
) -> AppResult<impl IntoResponse> {
    let allocation = allocate_volume(
        payload.total_volume.unwrap_or(0.0),
        payload.opportunity_type.as_deref().map(OpportunityType::parse),
        payload.likely_start_date,
        payload.end_date,
    );
    Ok(Json(allocation))
}

/* --------------------------------------------------------------------------
   Approval trigger
   -------------------------------------------------------------------------- */

/// Raise a pending override-price approval request when the record's
/// override price undercuts its projected price.
///
/// Each qualifying write raises a fresh request; earlier requests for the
/// same opportunity are left untouched as an audit trail.
async fn raise_approval_if_needed(
    state: &AppState,
    opportunity: &Opportunity,
) -> Result<(), AppError> {
    if !needs_price_approval(opportunity.projected_price, opportunity.override_price) {
        return Ok(());
    }

    let request = OverridePriceRepo::create(
        &state.pool,
        &CreateOverridePrice {
            opportunity_id: opportunity.opportunity_id,
            current_price: opportunity.projected_price,
            override_price: opportunity.override_price,
            business_justification: opportunity.business_justification.clone(),
            requestor: opportunity.requestor.clone(),
        },
    )
    .await?;

    tracing::info!(
        opportunity_id = opportunity.opportunity_id,
        request_id = request.id,
        "Override price approval request raised"
    );
    Ok(())
}
