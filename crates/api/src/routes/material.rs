//! Route definitions for the material catalog, mounted at `/materials`.

use axum::routing::get;
use axum::Router;

use crate::handlers::material;
use crate::state::AppState;

/// ```text
/// GET /  -> list_materials
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(material::list_materials))
}
