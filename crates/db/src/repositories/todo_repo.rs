//! Repository for the `todos` table.

use sqlx::PgPool;
use tasktrack_core::types::DbId;

use crate::filter::{LiveFilter, NOT_DELETED};
use crate::models::todo::{CreateTodo, Todo, TodoSearch, UpdateTodo};
use crate::models::UpdateOutcome;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, completed, sprint_id, created_at, updated_at";

/// Default ordering: insertion order.
const ORDER_BY: &str = "ORDER BY created_at ASC, id ASC";

/// Provides CRUD and search operations for todos. Soft-deleted rows are
/// invisible to every read.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo, returning the created row with its generated id
    /// and timestamps.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (title, description, sprint_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.sprint_id)
            .fetch_one(pool)
            .await
    }

    /// Find a live todo by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let filter = LiveFilter::new().equals_id("id", Some(id));
        let query = format!("SELECT {COLUMNS} FROM todos {}", filter.where_clause());
        filter
            .bind(sqlx::query_as::<_, Todo>(&query))
            .fetch_optional(pool)
            .await
    }

    /// List all live todos.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        Self::fetch(pool, &LiveFilter::new()).await
    }

    /// List live todos matching every present criterion.
    pub async fn search(pool: &PgPool, criteria: &TodoSearch) -> Result<Vec<Todo>, sqlx::Error> {
        let filter = LiveFilter::new()
            .contains("title", criteria.title.as_deref())
            .contains("description", criteria.description.as_deref())
            .equals_bool("completed", criteria.completed)
            .equals_id("sprint_id", criteria.sprint_id);
        Self::fetch(pool, &filter).await
    }

    /// Replace `title` and `completed` on a live todo.
    ///
    /// Zero rows affected means the todo does not exist or was deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<UpdateOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET title = $1, completed = $2, updated_at = NOW()
             WHERE id = $3 AND {NOT_DELETED}"
        );
        let result = sqlx::query(&query)
            .bind(&input.title)
            .bind(input.completed)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(UpdateOutcome::new(
            result.rows_affected(),
            "Todo updated successfully",
        ))
    }

    /// Soft-delete a todo by setting `is_deleted = true`.
    ///
    /// Returns `true` if a live row was marked. Deleting a missing or
    /// already-deleted todo is not an error.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET is_deleted = true, updated_at = NOW()
             WHERE id = $1 AND {NOT_DELETED}"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch(pool: &PgPool, filter: &LiveFilter) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todos {} {ORDER_BY}",
            filter.where_clause()
        );
        filter
            .bind(sqlx::query_as::<_, Todo>(&query))
            .fetch_all(pool)
            .await
    }
}
