//! Handlers for the material reference catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use vector_db::repositories::MaterialRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /materials
///
/// List the material catalog for the entry form dropdowns.
pub async fn list_materials(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let materials = MaterialRepo::list(&state.pool).await?;
    Ok(Json(materials))
}
