//! Bearer-token authorization gate and the [`AuthUser`] extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tasktrack_core::types::DbId;

use crate::auth::jwt::{verify_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

pub const MISSING_HEADER: &str = "Missing Authorization header";
pub const INVALID_FORMAT: &str = "Invalid Authorization format. Expected: Bearer <token>";

/// Identity of the caller, taken from verified token claims.
///
/// Use this as an extractor parameter in any handler behind the gate:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
}

/// Authenticate a request from its headers.
///
/// The `Authorization` value must split on single spaces into exactly
/// `Bearer` and a token.
pub fn authenticate(headers: &HeaderMap, config: &JwtConfig) -> Result<AuthUser, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized(MISSING_HEADER))?;

    let value = value
        .to_str()
        .map_err(|_| AppError::unauthorized(INVALID_FORMAT))?;

    let token = match value.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] if !token.is_empty() => *token,
        _ => return Err(AppError::unauthorized(INVALID_FORMAT)),
    };

    let claims = verify_token(token, config)?;

    Ok(AuthUser {
        user_id: claims.user_id,
        username: claims.username,
    })
}

/// Middleware for `axum::middleware::from_fn_with_state`.
///
/// Rejects unauthenticated requests with 401 before any handler runs and
/// stores the [`AuthUser`] in the request extensions for downstream use.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(req.headers(), &state.config.jwt).inspect_err(|_| {
        tracing::debug!(path = %req.uri().path(), "Rejected unauthenticated request");
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        authenticate(&parts.headers, &state.config.jwt)
    }
}
