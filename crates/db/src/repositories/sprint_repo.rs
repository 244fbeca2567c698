//! Repository for the `sprints` table.

use sqlx::PgPool;
use tasktrack_core::types::DbId;

use crate::filter::{LiveFilter, NOT_DELETED};
use crate::models::sprint::{CreateSprint, Sprint, SprintSearch, UpdateSprint};
use crate::models::UpdateOutcome;

const COLUMNS: &str = "id, title, completed, created_at, updated_at";

const ORDER_BY: &str = "ORDER BY created_at ASC, id ASC";

/// Provides CRUD and search operations for sprints.
pub struct SprintRepo;

impl SprintRepo {
    /// Insert a new sprint, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSprint) -> Result<Sprint, sqlx::Error> {
        let query = format!(
            "INSERT INTO sprints (title)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a live sprint by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sprint>, sqlx::Error> {
        let filter = LiveFilter::new().equals_id("id", Some(id));
        let query = format!("SELECT {COLUMNS} FROM sprints {}", filter.where_clause());
        filter
            .bind(sqlx::query_as::<_, Sprint>(&query))
            .fetch_optional(pool)
            .await
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Sprint>, sqlx::Error> {
        Self::fetch(pool, &LiveFilter::new()).await
    }

    pub async fn search(
        pool: &PgPool,
        criteria: &SprintSearch,
    ) -> Result<Vec<Sprint>, sqlx::Error> {
        let filter = LiveFilter::new()
            .contains("title", criteria.title.as_deref())
            .equals_bool("completed", criteria.completed);
        Self::fetch(pool, &filter).await
    }

    /// Replace `title` and `completed` on a live sprint.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSprint,
    ) -> Result<UpdateOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE sprints SET title = $1, completed = $2, updated_at = NOW()
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
            "Sprint updated successfully",
        ))
    }

    /// Soft-delete a sprint. Todos referencing it keep their `sprint_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE sprints SET is_deleted = true, updated_at = NOW()
             WHERE id = $1 AND {NOT_DELETED}"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch(pool: &PgPool, filter: &LiveFilter) -> Result<Vec<Sprint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sprints {} {ORDER_BY}",
            filter.where_clause()
        );
        filter
            .bind(sqlx::query_as::<_, Sprint>(&query))
            .fetch_all(pool)
            .await
    }
}
