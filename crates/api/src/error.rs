use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskboard_core::error::CoreError;

/// Application-level error type for services and HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taskboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for service and handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every domain and store failure is reported as a 500; only
        // request binding failures are 400.
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => {
                let code = match core {
                    CoreError::InvalidId => "INVALID_ID",
                    CoreError::NotFound { .. } => "NOT_FOUND",
                    CoreError::CreationFailed { entity, source } => {
                        tracing::error!(entity, error = %source, "Creation failed");
                        "CREATION_FAILED"
                    }
                    CoreError::InvalidSortDirection(_) => "INVALID_SORT_DIRECTION",
                    CoreError::UnknownSortField(_) => "UNKNOWN_SORT_FIELD",
                    CoreError::Validation(_) => "VALIDATION_ERROR",
                };
                let message = match core {
                    CoreError::Validation(msg) => msg.clone(),
                    other => other.to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }

            // --- Database errors ---
            AppError::Database(err) => {
                let (code, message) = classify_sqlx_error(err);
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "status": status.as_u16(),
            "code": code,
            "message": message,
            "timestamp": chrono::Utc::now().timestamp_millis(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an error code and a caller-facing message.
///
/// - `RowNotFound` is `NOT_FOUND`.
/// - Unknown columns (a sort field the store does not have) are `UNKNOWN_COLUMN`.
/// - Foreign key violations are `CONFLICT` and name the constraint.
/// - Everything else is `INTERNAL_ERROR` with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (&'static str, String) {
    match err {
        sqlx::Error::RowNotFound => ("NOT_FOUND", "Resource not found".to_string()),
        sqlx::Error::ColumnNotFound(column) => {
            ("UNKNOWN_COLUMN", format!("Unknown column: {column}"))
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // PostgreSQL undefined_column
            Some("42703") => ("UNKNOWN_COLUMN", db_err.message().to_string()),
            // PostgreSQL foreign_key_violation
            Some("23503") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                (
                    "CONFLICT",
                    format!("Operation violates foreign key constraint: {constraint}"),
                )
            }
            _ => {
                tracing::error!(error = %db_err, "Database error");
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            ("INTERNAL_ERROR", "An internal error occurred".to_string())
        }
    }
}
