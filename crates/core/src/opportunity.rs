//! Opportunity identity, defaulting, and approval-trigger rules.
//!
//! Covers everything that happens to a candidate record between "form
//! submitted" and "row ready to persist": composite-key validation,
//! sequential ID assignment, derived title/close-date/end-date defaults,
//! revenue recomputation, and the override-price approval trigger.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{CompositeKeyCheck, CoreError};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Pipeline status of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesStage {
    LeadDeprioritized,
    LeadNoSolution,
    TargetAccount,
    CustomerEngaged,
    ProposalSubmitted,
    WinCustomerVerbal,
    PostPipelineWin,
    PostPipelineLoss,
    PostPipelineOnHold,
}

impl SalesStage {
    pub const ALL: [SalesStage; 9] = [
        SalesStage::LeadDeprioritized,
        SalesStage::LeadNoSolution,
        SalesStage::TargetAccount,
        SalesStage::CustomerEngaged,
        SalesStage::ProposalSubmitted,
        SalesStage::WinCustomerVerbal,
        SalesStage::PostPipelineWin,
        SalesStage::PostPipelineLoss,
        SalesStage::PostPipelineOnHold,
    ];

    /// The stage label as stored and displayed.
    pub fn as_str(self) -> &'static str {
        match self {
            SalesStage::LeadDeprioritized => "Lead: Deprioritized Account",
            SalesStage::LeadNoSolution => "Lead: No Current Product Solution",
            SalesStage::TargetAccount => "Target Account",
            SalesStage::CustomerEngaged => "Customer Engaged",
            SalesStage::ProposalSubmitted => "Proposal Submitted",
            SalesStage::WinCustomerVerbal => "Win - Customer Verbal",
            SalesStage::PostPipelineWin => "Post-pipeline: Win (order shipped)",
            SalesStage::PostPipelineLoss => "Post-pipeline: Loss",
            SalesStage::PostPipelineOnHold => "Post-pipeline: On-hold",
        }
    }

    /// Parse a stage label; `None` for anything outside the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stage| stage.as_str() == s)
    }
}

/// Opportunity term classification.
///
/// Anything that is not literally `"Annual"` is treated as a short-term
/// (LTO) opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunityType {
    Annual,
    ShortTerm,
}

impl OpportunityType {
    pub fn parse(s: &str) -> Self {
        if s == "Annual" {
            OpportunityType::Annual
        } else {
            OpportunityType::ShortTerm
        }
    }
}

/// Lifecycle state of an override-price approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ApprovalStatus::Pending),
            "Approved" => Some(ApprovalStatus::Approved),
            "Rejected" => Some(ApprovalStatus::Rejected),
            _ => None,
        }
    }

    /// Approved and Rejected are terminal; only Pending requests resolve.
    pub fn is_terminal(self) -> bool {
        self != ApprovalStatus::Pending
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Days added to an annual opportunity's start date to reach the end of its
/// 13-period fiscal year (364 days inclusive of the start date).
pub const ANNUAL_TERM_DAYS: i64 = 363;

/// Next sequential opportunity ID: `max(existing) + 1`, or `1` for an empty
/// store. IDs are never reused after deletion.
pub fn next_opportunity_id(current_max: Option<DbId>) -> DbId {
    current_max.unwrap_or(0) + 1
}

// ---------------------------------------------------------------------------
// Draft and prepared record
// ---------------------------------------------------------------------------

/// Canonical candidate record, as normalized by the API boundary adapter.
#[derive(Debug, Clone, Default)]
pub struct OpportunityDraft {
    pub customer_name: String,
    pub material_id: String,
    pub likely_start_date: Option<NaiveDate>,
    pub title: Option<String>,
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
}

/// A validated record with all derived fields filled, ready to persist.
#[derive(Debug, Clone)]
pub struct PreparedOpportunity {
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
}

/// Check the required composite business key on a draft.
///
/// Blank (whitespace-only) strings count as missing.
pub fn check_composite_key(draft: &OpportunityDraft) -> CompositeKeyCheck {
    CompositeKeyCheck {
        customer_name: !draft.customer_name.trim().is_empty(),
        material_id: !draft.material_id.trim().is_empty(),
        likely_start_date: draft.likely_start_date.is_some(),
    }
}

/// Validate a draft and fill derived fields (spec'd defaulting rules).
///
/// - Composite key (customer, material, likely start date) must be present.
/// - `sales_stage`, when given, must belong to the fixed enumeration.
/// - `title` defaults to `"{customer} - {product}"`.
/// - Annual opportunities with no explicit end date get start + 363 days.
/// - `close_date` defaults to the end date, falling back to `now`.
/// - Projected revenue is recomputed from price x volume whenever both are
///   present; a caller-supplied figure is only kept when one of them is not.
pub fn prepare_opportunity(
    draft: OpportunityDraft,
    now: Timestamp,
) -> Result<PreparedOpportunity, CoreError> {
    let check = check_composite_key(&draft);
    if !check.is_complete() {
        return Err(CoreError::MissingCompositeKey(check));
    }
    let likely_start_date = draft
        .likely_start_date
        .ok_or_else(|| CoreError::MissingCompositeKey(check))?;

    if let Some(stage) = draft.sales_stage.as_deref() {
        if SalesStage::parse(stage).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown sales stage: {stage}"
            )));
        }
    }

    let end_date = resolve_end_date(
        draft.opportunity_type.as_deref(),
        likely_start_date,
        draft.end_date,
    );

    let title = draft.title.filter(|t| !t.trim().is_empty()).unwrap_or_else(|| {
        default_title(&draft.customer_name, draft.product.as_deref())
    });

    let close_date = end_date
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or(now);

    let projected_revenue =
        projected_revenue(draft.projected_price, draft.estimated_volume)
            .or(draft.projected_revenue);

    Ok(PreparedOpportunity {
        customer_name: draft.customer_name,
        material_id: draft.material_id,
        likely_start_date,
        title,
        product: draft.product,
        sales_lead: draft.sales_lead,
        sales_team: draft.sales_team,
        sales_stage: draft.sales_stage,
        opportunity_type: draft.opportunity_type,
        estimated_volume: draft.estimated_volume,
        projected_price: draft.projected_price,
        projected_revenue,
        override_price: draft.override_price,
        business_justification: draft.business_justification,
        requestor: draft.requestor,
        end_date,
        close_date,
    })
}

// ---------------------------------------------------------------------------
// Derivation rules
// ---------------------------------------------------------------------------

/// Default opportunity title: `"{customer} - {product}"`.
pub fn default_title(customer_name: &str, product: Option<&str>) -> String {
    format!("{customer_name} - {}", product.unwrap_or_default())
}

/// Resolve an opportunity's end date.
///
/// An explicit end date always wins. Otherwise annual opportunities run a
/// full fiscal year from their start date; short-term opportunities get no
/// computed end date (the caller must supply one).
pub fn resolve_end_date(
    opportunity_type: Option<&str>,
    likely_start: NaiveDate,
    explicit_end: Option<NaiveDate>,
) -> Option<NaiveDate> {
    if explicit_end.is_some() {
        return explicit_end;
    }
    match opportunity_type.map(OpportunityType::parse) {
        Some(OpportunityType::Annual) => Some(annual_end_date(likely_start)),
        _ => None,
    }
}

/// End date of an annual opportunity: start + 363 days.
pub fn annual_end_date(start: NaiveDate) -> NaiveDate {
    start + chrono::Duration::days(ANNUAL_TERM_DAYS)
}

/// Projected revenue = projected price x estimated volume, defined only when
/// both inputs are present.
pub fn projected_revenue(price: Option<f64>, volume: Option<f64>) -> Option<f64> {
    match (price, volume) {
        (Some(p), Some(v)) => Some(p * v),
        _ => None,
    }
}

/// Whether a record's prices trigger an override-price approval request:
/// the submitted override undercuts the projected price.
pub fn needs_price_approval(projected: Option<f64>, override_price: Option<f64>) -> bool {
    match (projected, override_price) {
        (Some(p), Some(o)) => o < p,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
