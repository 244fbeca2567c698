//! Handlers for the public `/register` and `/login` endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasktrack_core::error::CoreError;
use tasktrack_core::validation::{validate_email, validate_username, MIN_PASSWORD_LENGTH};
use tasktrack_db::models::user::{CreateUser, User};
use tasktrack_db::repositories::UserRepo;

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::check;
use crate::response::TokenResponse;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create a local account and return a token for it. Usernames and emails
/// must be unique among active users.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let username = input.username.trim();
    let email = input.email.trim();

    check(validate_username(username))?;
    check(validate_email(email))?;
    check(validate_password_strength(&input.password, MIN_PASSWORD_LENGTH))?;

    if UserRepo::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still win the race; the partial unique
    // indexes turn that into a 409 through `AppError::Database`.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(token_response(&state, user)?)))
}

/// POST /login
///
/// Exchange username + password for a token. Unknown users and wrong
/// passwords get the same 401.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(AppError::unauthorized(BAD_CREDENTIALS));
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(token_response(&state, user)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_response(state: &AppState, user: User) -> AppResult<TokenResponse> {
    let token = issue_token(user.id, &user.username, &state.config.jwt)?;
    Ok(TokenResponse {
        token,
        user: user.into(),
    })
}
