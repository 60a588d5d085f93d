//! Repository for the `opportunities` table.

use sqlx::{PgPool, QueryBuilder};
use vector_core::opportunity::PreparedOpportunity;
use vector_core::types::DbId;

use crate::models::opportunity::{Opportunity, OpportunitySearchFilters};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "opportunity_id, customer_name, material_id, likely_start_date, \
    title, product, sales_lead, sales_team, sales_stage, opportunity_type, \
    estimated_volume, projected_price, projected_revenue, override_price, \
    business_justification, requestor, end_date, close_date, created_at";

/// Provides CRUD operations for opportunities.
pub struct OpportunityRepo;

impl OpportunityRepo {
    /// Insert a new opportunity, assigning the next sequential ID inside the
    /// INSERT itself, and return the created row.
    ///
    /// The ID rule is `max(existing) + 1` (1 for an empty table). Computing
    /// it in a subquery makes read-and-assign a single statement, so two
    /// concurrent creates cannot both observe the same max and silently
    /// write the same ID; a residual collision hits the primary key and
    /// surfaces as a conflict.
    pub async fn create(
        pool: &PgPool,
        input: &PreparedOpportunity,
    ) -> Result<Opportunity, sqlx::Error> {
        let query = format!(
            "INSERT INTO opportunities
                (opportunity_id, customer_name, material_id, likely_start_date,
                 title, product, sales_lead, sales_team, sales_stage,
                 opportunity_type, estimated_volume, projected_price,
                 projected_revenue, override_price, business_justification,
                 requestor, end_date, close_date)
             VALUES
                ((SELECT COALESCE(MAX(opportunity_id), 0) + 1 FROM opportunities),
                 $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                 $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(&input.customer_name)
            .bind(&input.material_id)
            .bind(input.likely_start_date)
            .bind(&input.title)
            .bind(&input.product)
            .bind(&input.sales_lead)
            .bind(&input.sales_team)
            .bind(&input.sales_stage)
            .bind(&input.opportunity_type)
            .bind(input.estimated_volume)
            .bind(input.projected_price)
            .bind(input.projected_revenue)
            .bind(input.override_price)
            .bind(&input.business_justification)
            .bind(&input.requestor)
            .bind(input.end_date)
            .bind(input.close_date)
            .fetch_one(pool)
            .await
    }

    /// List all opportunities, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Opportunity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM opportunities ORDER BY created_at DESC");
        sqlx::query_as::<_, Opportunity>(&query).fetch_all(pool).await
    }

    /// Find an opportunity by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Opportunity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM opportunities WHERE opportunity_id = $1");
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Current maximum assigned ID, `None` for an empty table.
    pub async fn max_id(pool: &PgPool) -> Result<Option<DbId>, sqlx::Error> {
        let row: (Option<DbId>,) =
            sqlx::query_as("SELECT MAX(opportunity_id) FROM opportunities")
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Full-record update. Returns `None` if no row with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PreparedOpportunity,
    ) -> Result<Option<Opportunity>, sqlx::Error> {
        let query = format!(
            "UPDATE opportunities SET
                customer_name = $2,
                material_id = $3,
                likely_start_date = $4,
                title = $5,
                product = $6,
                sales_lead = $7,
                sales_team = $8,
                sales_stage = $9,
                opportunity_type = $10,
                estimated_volume = $11,
                projected_price = $12,
                projected_revenue = $13,
                override_price = $14,
                business_justification = $15,
                requestor = $16,
                end_date = $17,
                close_date = $18
             WHERE opportunity_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(id)
            .bind(&input.customer_name)
            .bind(&input.material_id)
            .bind(input.likely_start_date)
            .bind(&input.title)
            .bind(&input.product)
            .bind(&input.sales_lead)
            .bind(&input.sales_team)
            .bind(&input.sales_stage)
            .bind(&input.opportunity_type)
            .bind(input.estimated_volume)
            .bind(input.projected_price)
            .bind(input.projected_revenue)
            .bind(input.override_price)
            .bind(&input.business_justification)
            .bind(&input.requestor)
            .bind(input.end_date)
            .bind(input.close_date)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete one opportunity. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM opportunities WHERE opportunity_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a batch of opportunities by ID. Returns the removed count.
    pub async fn delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM opportunities WHERE opportunity_id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Filtered search, newest first.
    ///
    /// Filters combine with AND: exact ID, case-insensitive substring on
    /// customer name, substring on product OR material ID, and exact
    /// (case-insensitive) material ID. The caller guarantees at least one
    /// filter is present.
    pub async fn search(
        pool: &PgPool,
        filters: &OpportunitySearchFilters,
    ) -> Result<Vec<Opportunity>, sqlx::Error> {
        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM opportunities WHERE 1=1"));

        if let Some(id) = filters.opportunity_id {
            qb.push(" AND opportunity_id = ").push_bind(id);
        }
        if let Some(name) = filters.customer_name.as_deref() {
            if !name.trim().is_empty() {
                qb.push(" AND customer_name ILIKE ")
                    .push_bind(format!("%{}%", name.trim()));
            }
        }
        if let Some(product) = filters.product.as_deref() {
            if !product.trim().is_empty() {
                let like = format!("%{}%", product.trim());
                qb.push(" AND (product ILIKE ")
                    .push_bind(like.clone())
                    .push(" OR material_id ILIKE ")
                    .push_bind(like)
                    .push(")");
            }
        }
        if let Some(material) = filters.material_id.as_deref() {
            if !material.trim().is_empty() {
                qb.push(" AND LOWER(material_id) = LOWER(")
                    .push_bind(material.trim().to_string())
                    .push(")");
            }
        }

        qb.push(" ORDER BY created_at DESC");
        qb.build_query_as::<Opportunity>().fetch_all(pool).await
    }
}
