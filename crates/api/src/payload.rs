//! Boundary adapter for opportunity write payloads.
//!
//! The dashboard's historical API accepted several spellings per field
//! (`customerName` / `customer_Name` / `CUSTOMER_NAME`, ...). All of that
//! tolerance lives here as serde aliases on one DTO; everything past this
//! point uses the canonical snake_case schema in [`OpportunityDraft`].

use chrono::NaiveDate;
use serde::Deserialize;
use vector_core::opportunity::OpportunityDraft;

/// Wire DTO for creating or fully updating an opportunity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpportunityPayload {
    #[serde(default, alias = "customerName", alias = "customer_Name", alias = "CUSTOMER_NAME")]
    pub customer_name: String,
    #[serde(default, alias = "materialId", alias = "material_ID", alias = "MATERIAL_ID")]
    pub material_id: String,
    #[serde(
        default,
        alias = "likelyStartDate",
        alias = "likely_Start_Date",
        alias = "LIKELY_START_DATE"
    )]
    pub likely_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "PRODUCT")]
    pub product: Option<String>,
    #[serde(
        default,
        alias = "salesLead",
        alias = "sales_Lead",
        alias = "SALES_LEAD",
        alias = "doleSalesLead"
    )]
    pub sales_lead: Option<String>,
    #[serde(default, alias = "salesTeam", alias = "sales_Team", alias = "SALES_TEAM")]
    pub sales_team: Option<String>,
    #[serde(
        default,
        alias = "salesStage",
        alias = "sales_Stage",
        alias = "SALES_STAGE",
        alias = "status"
    )]
    pub sales_stage: Option<String>,
    #[serde(
        default,
        alias = "opportunityType",
        alias = "opportunity_Type",
        alias = "OPPORTUNITY_TYPE",
        alias = "annual_Or_LTO"
    )]
    pub opportunity_type: Option<String>,
    #[serde(
        default,
        alias = "estimatedVolume",
        alias = "estimated_Volume",
        alias = "ESTIMATED_VOLUME",
        alias = "volume"
    )]
    pub estimated_volume: Option<f64>,
    #[serde(
        default,
        alias = "projectedPrice",
        alias = "material_Projected_Price",
        alias = "MATERIAL_PROJECTED_PRICE"
    )]
    pub projected_price: Option<f64>,
    #[serde(
        default,
        alias = "projectedRevenue",
        alias = "pipeline_Projected_Revenue",
        alias = "PIPELINE_PROJECTED_REVENUE",
        alias = "amount"
    )]
    pub projected_revenue: Option<f64>,
    #[serde(default, alias = "overridePrice", alias = "override_Price", alias = "OVERRIDE_PRICE")]
    pub override_price: Option<f64>,
    #[serde(
        default,
        alias = "businessJustification",
        alias = "business_Justification",
        alias = "BUSINESS_JUSTIFICATION"
    )]
    pub business_justification: Option<String>,
    #[serde(default)]
    pub requestor: Option<String>,
    #[serde(default, alias = "endDate", alias = "end_Date", alias = "END_DATE")]
    pub end_date: Option<NaiveDate>,
}

impl OpportunityPayload {
    /// Convert to the canonical core draft.
    pub fn into_draft(self) -> OpportunityDraft {
        OpportunityDraft {
            customer_name: self.customer_name,
            material_id: self.material_id,
            likely_start_date: self.likely_start_date,
            title: self.title,
            product: self.product,
            sales_lead: self.sales_lead,
            sales_team: self.sales_team,
            sales_stage: self.sales_stage,
            opportunity_type: self.opportunity_type,
            estimated_volume: self.estimated_volume,
            projected_price: self.projected_price,
            projected_revenue: self.projected_revenue,
            override_price: self.override_price,
            business_justification: self.business_justification,
            requestor: self.requestor,
            end_date: self.end_date,
        }
    }
}

/// Wire DTO for the stateless volume-allocation preview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllocationPayload {
    #[serde(default, alias = "totalVolume", alias = "volume")]
    pub total_volume: Option<f64>,
    #[serde(default, alias = "opportunityType", alias = "opportunity_Type")]
    pub opportunity_type: Option<String>,
    #[serde(default, alias = "likelyStartDate", alias = "likely_Start_Date")]
    pub likely_start_date: Option<NaiveDate>,
    #[serde(default, alias = "endDate", alias = "end_Date")]
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_spelling_deserializes() {
        let payload: OpportunityPayload = serde_json::from_value(serde_json::json!({
            "customer_name": "Acme",
            "material_id": "M-1",
            "likely_start_date": "2025-04-01",
        }))
        .unwrap();
        assert_eq!(payload.customer_name, "Acme");
        assert_eq!(payload.material_id, "M-1");
        assert!(payload.likely_start_date.is_some());
    }

    #[test]
    fn legacy_spellings_normalize_to_same_fields() {
        let payload: OpportunityPayload = serde_json::from_value(serde_json::json!({
            "CUSTOMER_NAME": "Acme",
            "material_ID": "M-1",
            "likely_Start_Date": "2025-04-01",
            "annual_Or_LTO": "Annual",
            "amount": 1200.0,
        }))
        .unwrap();
        assert_eq!(payload.customer_name, "Acme");
        assert_eq!(payload.material_id, "M-1");
        assert_eq!(payload.opportunity_type.as_deref(), Some("Annual"));
        assert_eq!(payload.projected_revenue, Some(1200.0));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let payload: OpportunityPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.customer_name.is_empty());
        assert!(payload.likely_start_date.is_none());
    }
}
