pub mod auth;
pub mod health;
pub mod sprint;
pub mod todo;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Build the application route tree (mounted at the root, no prefix).
///
/// ```text
/// /health                       service health (public)
///
/// /register                     create account, returns token (public)
/// /login                        returns token (public)
///
/// /me                           current user (auth)
///
/// /todos                        list, create (auth)
/// /todos/search                 filtered list (auth)
/// /todos/{id}                   get, update, delete (auth)
///
/// /sprints                      list, create (auth)
/// /sprints/search               filtered list (auth)
/// /sprints/{id}                 get, update, delete (auth)
/// /sprints/{id}/todos           todos in a sprint (auth)
/// ```
pub fn app_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(handlers::user::me))
        .nest("/todos", todo::router())
        .nest("/sprints", sprint::router())
        .route_layer(from_fn_with_state(state, require_auth));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(protected)
}
