//! Repository for the `users` table (active accounts).

use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, UserAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, preferred_name, email, \
    is_rsm, is_all, is_admin, created_at";

/// Provides CRUD operations for active user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new active user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<UserAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (first_name, last_name, preferred_name, email, is_rsm, is_all, is_admin)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.preferred_name)
            .bind(input.email.trim())
            .bind(input.is_rsm)
            .bind(input.is_all)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// List all users ordered by last name, then first name.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY last_name, first_name");
        sqlx::query_as::<_, UserAccount>(&query).fetch_all(pool).await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// Whether a user with the given email exists (case-insensitive).
    pub async fn exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email.trim())
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Update a user's name and role flags, keyed by email.
    ///
    /// Returns `true` if a row was updated.
    pub async fn update_by_email(
        pool: &PgPool,
        email: &str,
        input: &UpdateUser,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                first_name = $2,
                last_name = $3,
                preferred_name = $4,
                is_rsm = $5,
                is_all = $6,
                is_admin = $7
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email.trim())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.preferred_name)
        .bind(input.is_rsm)
        .bind(input.is_all)
        .bind(input.is_admin)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
