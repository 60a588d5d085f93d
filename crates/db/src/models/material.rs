//! Material reference data model.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `materials` table.
///
/// Read-only reference data maintained upstream; the API only lists it for
/// the opportunity entry form (product picker and projected price lookup).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub material_id: String,
    pub product: String,
    pub product_category: Option<String>,
    pub base_uom: Option<String>,
    pub material_weight: Option<f64>,
    pub material_projected_price: Option<f64>,
}
