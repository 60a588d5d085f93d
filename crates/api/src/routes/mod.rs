pub mod health;
pub mod material;
pub mod opportunity;
pub mod override_price;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /opportunities                          list, create
/// /opportunities/search                   filtered search (GET)
/// /opportunities/bulk-delete              batch delete (POST)
/// /opportunities/volume-allocation        stateless allocation preview (POST)
/// /opportunities/{id}                     get, update, delete
/// /opportunities/{id}/volume-allocation   fiscal-period spread (GET)
/// /opportunities/{id}/override-prices     approval requests for one row (GET)
///
/// /materials                              material catalog (GET)
///
/// /users                                  list, create
/// /users/exists                           email existence probe (GET)
/// /users/by-email                         profile lookup (GET)
/// /users/pending                          list, register (upsert)
/// /users/pending/approve                  approve with granted roles (POST)
/// /users/pending/{email}                  reject (DELETE)
/// /users/{email}                          update (PUT)
///
/// /override-prices                        list, create
/// /override-prices/{id}/approve           resolve as approved (POST)
/// /override-prices/{id}/reject            resolve as rejected (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Opportunity pipeline CRUD, search, and allocation views.
        .nest("/opportunities", opportunity::router())
        // Material reference catalog.
        .nest("/materials", material::router())
        // Active accounts and the pending-registration queue.
        .nest("/users", user::router())
        // Override-price approval requests.
        .nest("/override-prices", override_price::router())
}
