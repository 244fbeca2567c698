//! Handlers for the `/todos` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tasktrack_core::error::CoreError;
use tasktrack_core::types::DbId;
use tasktrack_db::models::todo::{CreateTodo, Todo, TodoSearch, UpdateTodo};
use tasktrack_db::models::UpdateOutcome;
use tasktrack_db::repositories::{SprintRepo, TodoRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::check_title;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Todo", id })
}

/// GET /todos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Todo>>> {
    let todos = TodoRepo::find_all(&state.pool).await?;
    Ok(Json(todos))
}

/// POST /todos
///
/// A referenced sprint must exist and not be deleted.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateTodo>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    check_title(&input.title)?;
    if let Some(sprint_id) = input.sprint_id {
        if SprintRepo::find_by_id(&state.pool, sprint_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Sprint with id {sprint_id} does not exist"
            ))));
        }
    }

    let todo = TodoRepo::create(&state.pool, &input).await?;
    tracing::info!(todo_id = todo.id, user_id = auth_user.user_id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// POST /todos/search
pub async fn search(
    State(state): State<AppState>,
    AppJson(criteria): AppJson<TodoSearch>,
) -> AppResult<Json<Vec<Todo>>> {
    let todos = TodoRepo::search(&state.pool, &criteria).await?;
    Ok(Json(todos))
}

/// GET /todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Todo>> {
    let todo = TodoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(todo))
}

/// PUT /todos/{id}
///
/// Full replace of `title` and `completed`.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTodo>,
) -> AppResult<Json<UpdateOutcome>> {
    check_title(&input.title)?;

    let outcome = TodoRepo::update(&state.pool, id, &input).await?;
    if outcome.is_not_found() {
        return Err(not_found(id));
    }
    tracing::info!(todo_id = id, user_id = auth_user.user_id, "Todo updated");

    Ok(Json(outcome))
}

/// DELETE /todos/{id}
///
/// Soft delete. Repeating it, or targeting an unknown id, is still 204.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if TodoRepo::delete(&state.pool, id).await? {
        tracing::info!(todo_id = id, user_id = auth_user.user_id, "Todo deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
