//! Route definitions for the `/sprints` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sprint;
use crate::state::AppState;

/// Routes mounted at `/sprints`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// POST   /search       -> search
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// GET    /{id}/todos   -> list_todos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sprint::list).post(sprint::create))
        .route("/search", post(sprint::search))
        .route(
            "/{id}",
            get(sprint::get_by_id)
                .put(sprint::update)
                .delete(sprint::delete),
        )
        .route("/{id}/todos", get(sprint::list_todos))
}
