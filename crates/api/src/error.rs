use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tasktrack_core::error::CoreError;

use crate::auth::jwt::TokenError;

/// Error type returned by every handler and by the auth gate.
///
/// Responses carry a JSON body `{ "error": message, "code": CODE }`.
/// 500-class errors never echo their detail to the client; it is logged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure or constraint violation from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request body, path, or field value.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Message shown to clients for every 500.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Unauthorized(msg.into()))
    }

    /// Status, machine-readable code, and client-facing message.
    fn describe(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Database(err) => match unique_violation(err) {
                Some(constraint) => (StatusCode::CONFLICT, "CONFLICT", conflict_message(constraint)),
                None => {
                    tracing::error!(error = %err, "Database error");
                    internal()
                }
            },
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Internal error");
                internal()
            }
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AppError::unauthorized(err.to_string()),
            TokenError::Signing(msg) => {
                AppError::InternalError(format!("Token signing error: {msg}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.describe();
        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// The constraint name when `err` is a unique violation (SQLSTATE 23505) on
/// one of our `uq_*` indexes.
fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    let db_err = err.as_database_error()?;
    if db_err.code().as_deref() != Some("23505") {
        return None;
    }
    db_err.constraint().filter(|name| name.starts_with("uq_"))
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_username_active" => "Username already exists".to_string(),
        "uq_users_email_active" => "Email already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
