//! Shared response envelope types for API handlers.
//!
//! List endpoints return plain JSON arrays; mutation endpoints return either
//! the affected record or one of these small typed envelopes. Use these
//! instead of ad-hoc `serde_json::json!` so response shapes stay consistent.

use serde::Serialize;

/// Standard `{ "ok": true }` acknowledgement for mutations that have no
/// meaningful body.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Acknowledgement for the pending-user upsert, reporting which path ran.
#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub ok: bool,
    /// `"inserted"` or `"updated"`.
    pub action: &'static str,
}

/// Body for the user existence probe.
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}
