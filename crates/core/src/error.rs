use crate::types::DbId;

/// Per-field presence check for the opportunity composite business key.
///
/// The three fields are required on every create and full-record update.
/// Field names use the wire spelling so the API layer can echo them back
/// verbatim in the error detail map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeKeyCheck {
    pub customer_name: bool,
    pub material_id: bool,
    pub likely_start_date: bool,
}

impl CompositeKeyCheck {
    pub fn is_complete(&self) -> bool {
        self.customer_name && self.material_id && self.likely_start_date
    }

    /// Wire names of the missing fields, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !self.customer_name {
            out.push("customerName");
        }
        if !self.material_id {
            out.push("materialId");
        }
        if !self.likely_start_date {
            out.push("likelyStartDate");
        }
        out
    }

    /// `(field, "OK" | "MISSING")` pairs for all three fields.
    pub fn statuses(&self) -> [(&'static str, &'static str); 3] {
        let label = |ok: bool| if ok { "OK" } else { "MISSING" };
        [
            ("customerName", label(self.customer_name)),
            ("materialId", label(self.material_id)),
            ("likelyStartDate", label(self.likely_start_date)),
        ]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing required composite key fields: {}", .0.missing().join(", "))]
    MissingCompositeKey(CompositeKeyCheck),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
