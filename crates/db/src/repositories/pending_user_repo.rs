//! Repository for the `pending_users` staging table.
//!
//! Self-registered accounts wait here until an admin approves (copies the
//! row into `users` and removes it) or rejects (removes it).

use sqlx::PgPool;

use crate::models::user::{ApprovePendingUser, CreateUser, UserAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, preferred_name, email, \
    is_rsm, is_all, is_admin, created_at";

/// Outcome of a pending-user upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            UpsertOutcome::Inserted => "inserted",
            UpsertOutcome::Updated => "updated",
        }
    }
}

/// Provides operations for the pending-user staging table.
pub struct PendingUserRepo;

impl PendingUserRepo {
    /// List all pending registrations ordered by last name, then first name.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserAccount>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM pending_users ORDER BY last_name, first_name");
        sqlx::query_as::<_, UserAccount>(&query).fetch_all(pool).await
    }

    /// Insert a pending registration, or refresh the existing row when the
    /// email (case-insensitive) is already staged.
    ///
    /// Re-registering is how a user revises their requested details, so the
    /// second submission wins.
    pub async fn upsert(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM pending_users WHERE LOWER(email) = LOWER($1) FOR UPDATE",
        )
        .bind(input.email.trim())
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match existing {
            Some((id,)) => {
                sqlx::query(
                    "UPDATE pending_users SET
                        first_name = $2,
                        last_name = $3,
                        preferred_name = $4,
                        is_rsm = $5,
                        is_all = $6,
                        is_admin = $7
                     WHERE id = $1",
                )
                .bind(id)
                .bind(&input.first_name)
                .bind(&input.last_name)
                .bind(&input.preferred_name)
                .bind(input.is_rsm)
                .bind(input.is_all)
                .bind(input.is_admin)
                .execute(&mut *tx)
                .await?;
                UpsertOutcome::Updated
            }
            None => {
                sqlx::query(
                    "INSERT INTO pending_users
                        (first_name, last_name, preferred_name, email,
                         is_rsm, is_all, is_admin)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(&input.first_name)
                .bind(&input.last_name)
                .bind(&input.preferred_name)
                .bind(input.email.trim())
                .bind(input.is_rsm)
                .bind(input.is_all)
                .bind(input.is_admin)
                .execute(&mut *tx)
                .await?;
                UpsertOutcome::Inserted
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Remove a pending registration (admin rejection or cleanup).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pending_users WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Approve a pending registration: copy it into `users` with the granted
    /// role flags and remove the staged row, in one transaction.
    ///
    /// Returns the created active account, or `None` when no pending row
    /// matches the email. Either both writes commit or neither does.
    pub async fn approve(
        pool: &PgPool,
        input: &ApprovePendingUser,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!(
            "SELECT {COLUMNS} FROM pending_users WHERE LOWER(email) = LOWER($1) FOR UPDATE"
        );
        let Some(pending) = sqlx::query_as::<_, UserAccount>(&select)
            .bind(input.email.trim())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let insert = format!(
            "INSERT INTO users
                (first_name, last_name, preferred_name, email, is_rsm, is_all, is_admin)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, UserAccount>(&insert)
            .bind(&pending.first_name)
            .bind(&pending.last_name)
            .bind(&pending.preferred_name)
            .bind(&pending.email)
            .bind(input.is_rsm)
            .bind(input.is_all)
            .bind(input.is_admin)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM pending_users WHERE id = $1")
            .bind(pending.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(created))
    }
}
