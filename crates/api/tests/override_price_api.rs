//! HTTP-level integration tests for the `/override-prices` API endpoints.
//!
//! Requests are an audit trail keyed by opportunity ID; resolution is
//! single-shot and requires a note.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, expect_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_request(opportunity_id: i64) -> serde_json::Value {
    json!({
        "opportunityId": opportunity_id,
        "currentPrice": 10.0,
        "overridePrice": 8.0,
        "businessJustification": "Volume commitment from the customer",
        "requestor": "dana@example.com",
    })
}

async fn create_request(pool: &PgPool, opportunity_id: i64) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/override-prices", new_request(opportunity_id)).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Creation and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_request_starts_pending(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/override-prices", new_request(1)).await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["status"], "Pending");
    assert_eq!(json["opportunity_id"], 1);
    assert!(json["approved_at"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_accepts_legacy_opportunity_id_spelling(pool: PgPool) {
    let app = build_test_app(pool);
    // The historical client sent the misspelled key.
    let response = post_json(
        app,
        "/api/v1/override-prices",
        json!({ "Oppertunity_ID": 7, "OverridePrice": 8.0 }),
    )
    .await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["opportunity_id"], 7);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_filters_by_opportunity(pool: PgPool) {
    create_request(&pool, 1).await;
    create_request(&pool, 1).await;
    create_request(&pool, 2).await;

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/override-prices").await;
    let all = expect_json(response, StatusCode::OK).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/opportunities/1/override-prices").await;
    let scoped = expect_json(response, StatusCode::OK).await;
    assert_eq!(scoped.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_requires_a_note(pool: PgPool) {
    let id = create_request(&pool, 1).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/override-prices/{id}/approve"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A whitespace-only note is no note.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/override-prices/{id}/approve"),
        json!({ "note": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_resolves_once_then_conflicts(pool: PgPool) {
    let id = create_request(&pool, 1).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/override-prices/{id}/approve"),
        json!({ "note": "Margin holds at this volume" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["status"], "Approved");
    assert_eq!(json["approval_note"], "Margin holds at this volume");
    assert!(json["approved_at"].is_string());

    // Already resolved: the transition is single-shot.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/override-prices/{id}/approve"),
        json!({ "note": "Second attempt" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reject_resolves_with_note(pool: PgPool) {
    let id = create_request(&pool, 1).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/override-prices/{id}/reject"),
        json!({ "note": "Undercuts the floor price" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["status"], "Rejected");

    // Rejection is also terminal.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/override-prices/{id}/approve"),
        json!({ "note": "Changed my mind" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolving_unknown_request_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/override-prices/999/approve",
        json!({ "note": "There is nothing here" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
