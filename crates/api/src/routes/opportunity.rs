//! Route definitions for the opportunity pipeline, mounted at `/opportunities`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{opportunity, override_price};
use crate::state::AppState;

/// ```text
/// GET    /                          -> list_opportunities
/// POST   /                          -> create_opportunity
/// GET    /search                    -> search_opportunities
/// POST   /bulk-delete               -> bulk_delete_opportunities
/// POST   /volume-allocation         -> preview_volume_allocation
/// GET    /{id}                      -> get_opportunity
/// PUT    /{id}                      -> update_opportunity
/// DELETE /{id}                      -> delete_opportunity
/// GET    /{id}/volume-allocation    -> volume_allocation
/// GET    /{id}/override-prices      -> list_requests_for_opportunity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(opportunity::list_opportunities).post(opportunity::create_opportunity),
        )
        .route("/search", get(opportunity::search_opportunities))
        .route("/bulk-delete", post(opportunity::bulk_delete_opportunities))
        .route(
            "/volume-allocation",
            post(opportunity::preview_volume_allocation),
        )
        .route(
            "/{id}",
            get(opportunity::get_opportunity)
                .put(opportunity::update_opportunity)
                .delete(opportunity::delete_opportunity),
        )
        .route("/{id}/volume-allocation", get(opportunity::volume_allocation))
        .route(
            "/{id}/override-prices",
            get(override_price::list_requests_for_opportunity),
        )
}
