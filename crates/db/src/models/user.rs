//! User account and pending-user models.
//!
//! Active and pending accounts share one shape; pending rows live in a
//! separate staging table until an admin approves or rejects them. Email is
//! the uniqueness key for both tables, case-insensitive.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vector_core::types::{DbId, Timestamp};

/// A row from the `users` or `pending_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(skip)]
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub email: String,
    pub is_rsm: bool,
    pub is_all: bool,
    pub is_admin: bool,
    #[serde(skip)]
    pub created_at: Timestamp,
}

/// DTO for creating an active user or registering a pending one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub preferred_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_rsm: bool,
    #[serde(default)]
    pub is_all: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// DTO for updating an active user, keyed by email in the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub preferred_name: String,
    #[serde(default)]
    pub is_rsm: bool,
    #[serde(default)]
    pub is_all: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// Request body for approving a pending user: the email identifies the
/// staged row, the flags are the roles granted by the approving admin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovePendingUser {
    pub email: String,
    #[serde(default)]
    pub is_rsm: bool,
    #[serde(default)]
    pub is_all: bool,
    #[serde(default)]
    pub is_admin: bool,
}
