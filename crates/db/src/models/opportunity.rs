//! Opportunity entity model and request DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vector_core::types::{DbId, Timestamp};

/// A row from the `opportunities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Opportunity {
    pub opportunity_id: DbId,
    pub customer_name: String,
    pub material_id: String,
    pub likely_start_date: NaiveDate,
    pub title: String,
    pub product: Option<String>,
    pub sales_lead: Option<String>,
    pub sales_team: Option<String>,
    pub sales_stage: Option<String>,
    pub opportunity_type: Option<String>,
    pub estimated_volume: Option<f64>,
    pub projected_price: Option<f64>,
    pub projected_revenue: Option<f64>,
    pub override_price: Option<f64>,
    pub business_justification: Option<String>,
    pub requestor: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub close_date: Timestamp,
    pub created_at: Timestamp,
}

/// Search filters for the opportunity search endpoint. At least one filter
/// must be present; the handler rejects an all-empty set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpportunitySearchFilters {
    #[serde(alias = "opportunityId")]
    pub opportunity_id: Option<DbId>,
    #[serde(alias = "customerName")]
    pub customer_name: Option<String>,
    pub product: Option<String>,
    #[serde(alias = "materialId")]
    pub material_id: Option<String>,
}

impl OpportunitySearchFilters {
    fn has(field: &Option<String>) -> bool {
        field.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.opportunity_id.is_none()
            && !Self::has(&self.customer_name)
            && !Self::has(&self.product)
            && !Self::has(&self.material_id)
    }
}

/// Request body for bulk deletion by ID list.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<DbId>,
}
