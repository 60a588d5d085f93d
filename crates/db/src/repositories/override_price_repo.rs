//! Repository for the `override_price_requests` table.

use sqlx::PgPool;
use vector_core::opportunity::ApprovalStatus;
use vector_core::types::{DbId, Timestamp};

use crate::models::override_price::{CreateOverridePrice, OverridePriceRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, opportunity_id, current_price, override_price, \
    business_justification, requestor, status, requested_at, approved_at, \
    approval_note";

/// Provides operations for override-price approval requests.
pub struct OverridePriceRepo;

impl OverridePriceRepo {
    /// Insert a new request in `Pending` state, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOverridePrice,
    ) -> Result<OverridePriceRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO override_price_requests
                (opportunity_id, current_price, override_price,
                 business_justification, requestor)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverridePriceRequest>(&query)
            .bind(input.opportunity_id)
            .bind(input.current_price)
            .bind(input.override_price)
            .bind(&input.business_justification)
            .bind(&input.requestor)
            .fetch_one(pool)
            .await
    }

    /// List all requests, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<OverridePriceRequest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM override_price_requests ORDER BY requested_at DESC");
        sqlx::query_as::<_, OverridePriceRequest>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all requests raised against one opportunity, newest first.
    pub async fn list_for_opportunity(
        pool: &PgPool,
        opportunity_id: DbId,
    ) -> Result<Vec<OverridePriceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM override_price_requests
             WHERE opportunity_id = $1
             ORDER BY requested_at DESC"
        );
        sqlx::query_as::<_, OverridePriceRequest>(&query)
            .bind(opportunity_id)
            .fetch_all(pool)
            .await
    }

    /// Find a request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OverridePriceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM override_price_requests WHERE id = $1");
        sqlx::query_as::<_, OverridePriceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a pending request to `Approved` or `Rejected`.
    ///
    /// The `status = 'Pending'` guard makes the transition single-shot at
    /// the database level; `None` means the row was missing or already
    /// resolved (the handler distinguishes the two).
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        status: ApprovalStatus,
        note: &str,
        resolved_at: Timestamp,
    ) -> Result<Option<OverridePriceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE override_price_requests
             SET status = $2, approval_note = $3, approved_at = $4
             WHERE id = $1 AND status = 'Pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverridePriceRequest>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(note)
            .bind(resolved_at)
            .fetch_optional(pool)
            .await
    }
}
