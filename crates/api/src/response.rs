//! Response bodies that are not plain entities.
//!
//! Entities and lists are serialized bare; only the auth endpoints wrap
//! their payload.

use serde::Serialize;
use tasktrack_db::models::user::UserResponse;

/// Body returned by `POST /register` and `POST /login`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserResponse,
}
