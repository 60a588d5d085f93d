//! Repository for the `materials` reference table.

use sqlx::PgPool;

use crate::models::material::Material;

const COLUMNS: &str = "material_id, product, product_category, base_uom, \
    material_weight, material_projected_price";

/// Read access to the material catalog.
pub struct MaterialRepo;

impl MaterialRepo {
    /// List all materials ordered by product description.
    pub async fn list(pool: &PgPool) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials ORDER BY product ASC");
        sqlx::query_as::<_, Material>(&query).fetch_all(pool).await
    }
}
