//! Override-price approval request models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vector_core::types::{DbId, Timestamp};

/// A row from the `override_price_requests` table.
///
/// An independent audit trail: resolving a request never writes back to the
/// opportunity row it snapshots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OverridePriceRequest {
    pub id: DbId,
    pub opportunity_id: DbId,
    pub current_price: Option<f64>,
    pub override_price: Option<f64>,
    pub business_justification: Option<String>,
    pub requestor: Option<String>,
    pub status: String,
    pub requested_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    pub approval_note: Option<String>,
}

/// DTO for creating an approval request directly via the API.
///
/// The aliases accept the legacy wire spellings (including the historical
/// `Oppertunity_ID` typo) so old dashboard builds keep working; everything
/// is normalized to the canonical schema here at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOverridePrice {
    #[serde(alias = "opportunityId", alias = "Oppertunity_ID", alias = "OPPORTUNITY_ID")]
    pub opportunity_id: DbId,
    #[serde(default, alias = "currentPrice", alias = "CurrentPrice")]
    pub current_price: Option<f64>,
    #[serde(default, alias = "overridePrice", alias = "OverridePrice")]
    pub override_price: Option<f64>,
    #[serde(
        default,
        alias = "businessJustification",
        alias = "BusinessJustification"
    )]
    pub business_justification: Option<String>,
    #[serde(default, alias = "Requestor")]
    pub requestor: Option<String>,
}

/// Request body for resolving (approving or rejecting) a request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveOverridePrice {
    pub note: Option<String>,
}
