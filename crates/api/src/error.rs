use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use vector_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the API's `{error, details?}`
/// JSON error shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vector-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A missing resource keyed by something other than a numeric ID,
    /// such as an email address.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                CoreError::MissingCompositeKey(check) => {
                    let mut map = Map::new();
                    for (field, status) in check.statuses() {
                        map.insert(field.to_string(), Value::String(status.to_string()));
                    }
                    (
                        StatusCode::BAD_REQUEST,
                        "Missing required composite key fields".to_string(),
                        Some(Value::Object(map)),
                    )
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
        };

        let mut body = json!({ "error": message });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, message, and detail payload.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 409.
/// - Everything else maps to 500, with the underlying message carried in
///   `details` for diagnostics.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String, Option<Value>) {
    match err {
        sqlx::Error::RowNotFound => {
            (StatusCode::NOT_FOUND, "Resource not found".to_string(), None)
        }
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") || constraint.ends_with("_pkey") {
                    return (
                        StatusCode::CONFLICT,
                        format!("Duplicate value violates unique constraint: {constraint}"),
                        None,
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database operation failed".to_string(),
                Some(Value::String(db_err.to_string())),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database operation failed".to_string(),
                Some(Value::String(other.to_string())),
            )
        }
    }
}
