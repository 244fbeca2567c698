//! Todo entity model and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use tasktrack_core::types::DbId;

use crate::wire_time::WireTime;

/// A live row from the `todos` table. `is_deleted` is never selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub sprint_id: Option<DbId>,
    pub created_at: WireTime,
    pub updated_at: WireTime,
}

/// DTO for creating a todo. New todos always start incomplete.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub sprint_id: Option<DbId>,
}

/// An explicit `null` description is stored as the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// DTO for a full replace of the mutable todo fields.
///
/// An omitted `completed` replaces the stored value with `false`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Search criteria for `POST /todos/search`. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoSearch {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub sprint_id: Option<DbId>,
}
