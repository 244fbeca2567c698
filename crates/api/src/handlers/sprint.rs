//! Handlers for the `/sprints` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tasktrack_core::error::CoreError;
use tasktrack_core::types::DbId;
use tasktrack_db::models::sprint::{CreateSprint, Sprint, SprintSearch, UpdateSprint};
use tasktrack_db::models::todo::{Todo, TodoSearch};
use tasktrack_db::models::UpdateOutcome;
use tasktrack_db::repositories::{SprintRepo, TodoRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::check_title;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Sprint",
        id,
    })
}

/// GET /sprints
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Sprint>>> {
    let sprints = SprintRepo::find_all(&state.pool).await?;
    Ok(Json(sprints))
}

/// POST /sprints
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateSprint>,
) -> AppResult<(StatusCode, Json<Sprint>)> {
    check_title(&input.title)?;

    let sprint = SprintRepo::create(&state.pool, &input).await?;
    tracing::info!(sprint_id = sprint.id, user_id = auth_user.user_id, "Sprint created");

    Ok((StatusCode::CREATED, Json(sprint)))
}

/// POST /sprints/search
pub async fn search(
    State(state): State<AppState>,
    AppJson(criteria): AppJson<SprintSearch>,
) -> AppResult<Json<Vec<Sprint>>> {
    let sprints = SprintRepo::search(&state.pool, &criteria).await?;
    Ok(Json(sprints))
}

/// GET /sprints/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Sprint>> {
    let sprint = SprintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(sprint))
}

/// PUT /sprints/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSprint>,
) -> AppResult<Json<UpdateOutcome>> {
    check_title(&input.title)?;

    let outcome = SprintRepo::update(&state.pool, id, &input).await?;
    if outcome.is_not_found() {
        return Err(not_found(id));
    }
    tracing::info!(sprint_id = id, user_id = auth_user.user_id, "Sprint updated");

    Ok(Json(outcome))
}

/// DELETE /sprints/{id}
///
/// Soft delete; the sprint's todos keep their `sprint_id`.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if SprintRepo::delete(&state.pool, id).await? {
        tracing::info!(sprint_id = id, user_id = auth_user.user_id, "Sprint deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /sprints/{id}/todos
///
/// Live todos assigned to a live sprint.
pub async fn list_todos(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Vec<Todo>>> {
    if SprintRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }

    let criteria = TodoSearch {
        sprint_id: Some(id),
        ..Default::default()
    };
    let todos = TodoRepo::search(&state.pool, &criteria).await?;
    Ok(Json(todos))
}
