//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tasktrack_core::types::DbId;

use crate::wire_time::WireTime;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub external_id: Option<String>,
    pub provider: String,
    pub is_active: bool,
    pub created_at: WireTime,
    pub updated_at: WireTime,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub provider: String,
    pub is_active: bool,
    pub created_at: WireTime,
    pub updated_at: WireTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            external_id: user.external_id,
            provider: user.provider,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new local user. The caller hashes the password.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
