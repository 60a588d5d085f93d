//! HTTP-level integration tests for the `/opportunities` API endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Rows needing specific IDs are seeded with direct SQL so the ID-assignment
//! rule can be observed from the API side.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, delete, expect_json, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Minimal valid creation payload.
fn valid_payload() -> serde_json::Value {
    json!({
        "customerName": "Acme Foods",
        "materialId": "MAT-100",
        "likelyStartDate": "2025-04-01",
        "product": "Pineapple Chunks",
    })
}

/// Seed a row with an explicit ID, bypassing the API's ID assignment.
async fn seed_opportunity(pool: &PgPool, id: i64) {
    sqlx::query(
        "INSERT INTO opportunities
            (opportunity_id, customer_name, material_id, likely_start_date,
             title, close_date)
         VALUES ($1, 'Seeded Customer', 'MAT-SEED', '2025-04-01',
                 'Seeded', NOW())",
    )
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Creation and ID assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_on_empty_store_assigns_id_one(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/opportunities", valid_payload()).await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["opportunity_id"], 1);
    assert_eq!(json["customer_name"], "Acme Foods");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_assigns_max_plus_one_even_with_gaps(pool: PgPool) {
    seed_opportunity(&pool, 3).await;
    seed_opportunity(&pool, 7).await;

    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/opportunities", valid_payload()).await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["opportunity_id"], 8, "IDs are max + 1, never gap-filling");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_missing_composite_key_reports_field_statuses(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/opportunities",
        json!({ "customerName": "Acme Foods" }),
    )
    .await;

    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["details"]["customerName"], "OK");
    assert_eq!(json["details"]["materialId"], "MISSING");
    assert_eq!(json["details"]["likelyStartDate"], "MISSING");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_unknown_sales_stage(pool: PgPool) {
    let app = build_test_app(pool);
    let mut payload = valid_payload();
    payload["salesStage"] = json!("Totally Made Up Stage");

    let response = post_json(app, "/api/v1/opportunities", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Defaulting rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_defaults_title_and_annual_end_date(pool: PgPool) {
    let app = build_test_app(pool);
    let mut payload = valid_payload();
    payload["opportunityType"] = json!("Annual");

    let response = post_json(app, "/api/v1/opportunities", payload).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["title"], "Acme Foods - Pineapple Chunks");
    // Annual term: start + 363 days.
    assert_eq!(json["end_date"], "2026-03-30");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_recomputes_projected_revenue_from_price_and_volume(pool: PgPool) {
    let app = build_test_app(pool);
    let mut payload = valid_payload();
    payload["projectedPrice"] = json!(10.0);
    payload["estimatedVolume"] = json!(100.0);
    // A stale client-side figure must lose to the recomputation.
    payload["projectedRevenue"] = json!(555.0);

    let response = post_json(app, "/api/v1/opportunities", payload).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["projected_revenue"], 1000.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_accepts_legacy_field_spellings(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/opportunities",
        json!({
            "CUSTOMER_NAME": "Acme Foods",
            "material_ID": "MAT-100",
            "likely_Start_Date": "2025-04-01",
            "annual_Or_LTO": "Annual",
        }),
    )
    .await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["customer_name"], "Acme Foods");
    assert_eq!(json["opportunity_type"], "Annual");
}

// ---------------------------------------------------------------------------
// Override-price approval trigger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn undercutting_override_price_raises_pending_request(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let mut payload = valid_payload();
    payload["projectedPrice"] = json!(10.0);
    payload["overridePrice"] = json!(8.0);

    let response = post_json(app, "/api/v1/opportunities", payload).await;
    let created = expect_json(response, StatusCode::CREATED).await;
    let id = created["opportunity_id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/opportunities/{id}/override-prices")).await;
    let requests = expect_json(response, StatusCode::OK).await;

    let requests = requests.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["status"], "Pending");
    assert_eq!(requests[0]["override_price"], 8.0);
    assert_eq!(requests[0]["current_price"], 10.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn override_price_above_projected_raises_nothing(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let mut payload = valid_payload();
    payload["projectedPrice"] = json!(10.0);
    payload["overridePrice"] = json!(12.0);

    let response = post_json(app, "/api/v1/opportunities", payload).await;
    let created = expect_json(response, StatusCode::CREATED).await;
    let id = created["opportunity_id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/opportunities/{id}/override-prices")).await;
    let requests = expect_json(response, StatusCode::OK).await;
    assert!(requests.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Read, update, delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_opportunity_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/opportunities/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_replaces_record_and_recomputes_revenue(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/opportunities", valid_payload()).await;
    let created = expect_json(response, StatusCode::CREATED).await;
    let id = created["opportunity_id"].as_i64().unwrap();

    let mut payload = valid_payload();
    payload["projectedPrice"] = json!(5.0);
    payload["estimatedVolume"] = json!(200.0);

    let app = build_test_app(pool);
    let response = put_json(app, &format!("/api/v1/opportunities/{id}"), payload).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["opportunity_id"], id);
    assert_eq!(json["projected_revenue"], 1000.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_missing_opportunity_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = put_json(app, "/api/v1/opportunities/42", valid_payload()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_row_and_404s_afterwards(pool: PgPool) {
    seed_opportunity(&pool, 5).await;

    let app = build_test_app(pool.clone());
    let response = delete(app, "/api/v1/opportunities/5").await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["ok"], true);

    let app = build_test_app(pool);
    let response = delete(app, "/api/v1/opportunities/5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_delete_rejects_empty_id_list(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/opportunities/bulk-delete", json!({ "ids": [] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_delete_removes_listed_rows(pool: PgPool) {
    seed_opportunity(&pool, 1).await;
    seed_opportunity(&pool, 2).await;
    seed_opportunity(&pool, 3).await;

    let app = build_test_app(pool.clone());
    let response =
        post_json(app, "/api/v1/opportunities/bulk-delete", json!({ "ids": [1, 3] })).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["ok"], true);

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/opportunities").await;
    let remaining = expect_json(response, StatusCode::OK).await;
    let remaining = remaining.as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["opportunity_id"], 2);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn search_without_filters_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/opportunities/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_customer_name_substring(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/opportunities", valid_payload()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/opportunities/search?customerName=acme").await;
    let matches = expect_json(response, StatusCode::OK).await;
    assert_eq!(matches.as_array().unwrap().len(), 1);

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/opportunities/search?customerName=nomatch").await;
    let matches = expect_json(response, StatusCode::OK).await;
    assert!(matches.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Volume allocation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn full_year_annual_volume_spreads_evenly(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/opportunities",
        json!({
            "customerName": "Acme Foods",
            "materialId": "MAT-100",
            "likelyStartDate": "2025-03-23",
            "opportunityType": "Annual",
            "estimatedVolume": 3640.0,
        }),
    )
    .await;
    let created = expect_json(response, StatusCode::CREATED).await;
    let id = created["opportunity_id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/opportunities/{id}/volume-allocation")).await;
    let allocation = expect_json(response, StatusCode::OK).await;

    let map = allocation.as_object().unwrap();
    assert_eq!(map.len(), 13);
    for period in map.values() {
        assert_eq!(period.as_i64().unwrap(), 280);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn allocation_prorates_first_period_from_start_date(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/opportunities/volume-allocation",
        json!({
            "totalVolume": 3640.0,
            "opportunityType": "Annual",
            "likelyStartDate": "2025-04-01",
        }),
    )
    .await;
    let allocation = expect_json(response, StatusCode::OK).await;

    // 19 active days at 10/day in P1 (01-04 .. 19-04 inclusive).
    assert_eq!(allocation["P1"], 190);
    assert_eq!(allocation["P2"], 280);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn allocation_preview_is_empty_for_short_term(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/opportunities/volume-allocation",
        json!({
            "totalVolume": 3640.0,
            "opportunityType": "LTO",
        }),
    )
    .await;
    let allocation = expect_json(response, StatusCode::OK).await;
    assert!(allocation.as_object().unwrap().is_empty());
}
