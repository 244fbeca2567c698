//! Handlers for the authenticated caller's own account.

use axum::extract::State;
use axum::Json;
use tasktrack_core::error::CoreError;
use tasktrack_db::models::user::UserResponse;
use tasktrack_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /me
///
/// The account behind the presented token. A token for a user that has
/// since been deactivated yields 404.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    Ok(Json(user.into()))
}
