//! Sprint entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasktrack_core::types::DbId;

use crate::wire_time::WireTime;

/// A live row from the `sprints` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Sprint {
    pub id: DbId,
    pub title: String,
    pub completed: bool,
    pub created_at: WireTime,
    pub updated_at: WireTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSprint {
    pub title: String,
}

/// DTO for a full replace of the mutable sprint fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSprint {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Search criteria for `POST /sprints/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SprintSearch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}
