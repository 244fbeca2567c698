//! Integration tests for `TodoRepo` against a real database.
//!
//! Covers create/read-back, full-field update, soft-delete visibility, and
//! every search criterion (alone and combined).

use std::collections::BTreeSet;

use sqlx::PgPool;
use tasktrack_db::models::sprint::CreateSprint;
use tasktrack_db::models::todo::{CreateTodo, Todo, TodoSearch, UpdateTodo};
use tasktrack_db::repositories::{SprintRepo, TodoRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_todo(title: &str, description: &str, sprint_id: Option<i64>) -> CreateTodo {
    CreateTodo {
        title: title.to_string(),
        description: description.to_string(),
        sprint_id,
    }
}

async fn create(pool: &PgPool, title: &str, description: &str) -> Todo {
    TodoRepo::create(pool, &new_todo(title, description, None))
        .await
        .unwrap()
}

fn ids(todos: &[Todo]) -> BTreeSet<i64> {
    todos.iter().map(|t| t.id).collect()
}

// ---------------------------------------------------------------------------
// Create / read-back
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_generated_fields(pool: PgPool) {
    let todo = TodoRepo::create(&pool, &new_todo("Buy milk", "", None))
        .await
        .unwrap();

    assert!(todo.id > 0);
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, "");
    assert!(!todo.completed, "new todos start incomplete");
    assert_eq!(todo.sprint_id, None);
    assert!(!todo.created_at.is_unset());
    assert!(!todo.updated_at.is_unset());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_then_find_by_id_round_trips(pool: PgPool) {
    let sprint = SprintRepo::create(
        &pool,
        &CreateSprint {
            title: "Sprint 1".to_string(),
        },
    )
    .await
    .unwrap();

    let created = TodoRepo::create(&pool, &new_todo("Write docs", "API section", Some(sprint.id)))
        .await
        .unwrap();

    let found = TodoRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("created todo should be readable");

    assert_eq!(found, created);
    assert_eq!(found.sprint_id, Some(sprint.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_all_returns_insertion_order(pool: PgPool) {
    let first = create(&pool, "First", "").await;
    let second = create(&pool, "Second", "").await;
    let third = create(&pool, "Third", "").await;

    let all = TodoRepo::find_all(&pool).await.unwrap();
    let order: Vec<i64> = all.iter().map(|t| t.id).collect();

    assert_eq!(order, vec![first.id, second.id, third.id]);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_fields(pool: PgPool) {
    let todo = create(&pool, "Buy milk", "").await;

    let outcome = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            title: "Buy milk and eggs".to_string(),
            completed: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.rows_affected, 1);
    assert!(!outcome.is_not_found());
    assert!(!outcome.message.is_empty());

    let updated = TodoRepo::find_by_id(&pool, todo.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Buy milk and eggs");
    assert!(updated.completed);
    assert!(updated.updated_at >= updated.created_at);
    assert!(updated.updated_at >= todo.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_affects_zero_rows(pool: PgPool) {
    let outcome = TodoRepo::update(
        &pool,
        99_999,
        &UpdateTodo {
            title: "Ghost".to_string(),
            completed: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.rows_affected, 0);
    assert!(outcome.is_not_found());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_deleted_affects_zero_rows(pool: PgPool) {
    let todo = create(&pool, "Soon gone", "").await;
    TodoRepo::delete(&pool, todo.id).await.unwrap();

    let outcome = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            title: "Resurrected".to_string(),
            completed: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.rows_affected, 0);

    let title: String = sqlx::query_scalar("SELECT title FROM todos WHERE id = $1")
        .bind(todo.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title, "Soon gone", "deleted row must not be modified");
}

// ---------------------------------------------------------------------------
// Soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_hides_from_every_read(pool: PgPool) {
    let keep = create(&pool, "Keep me", "").await;
    let gone = create(&pool, "Delete me", "").await;

    let deleted = TodoRepo::delete(&pool, gone.id).await.unwrap();
    assert!(deleted, "first delete should mark the row");

    let all = TodoRepo::find_all(&pool).await.unwrap();
    assert_eq!(ids(&all), BTreeSet::from([keep.id]));

    assert!(TodoRepo::find_by_id(&pool, gone.id).await.unwrap().is_none());

    let search = TodoRepo::search(
        &pool,
        &TodoSearch {
            title: Some("Delete".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(search.is_empty(), "search must not leak deleted rows");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_is_logical_not_physical(pool: PgPool) {
    let todo = create(&pool, "Logical", "").await;
    TodoRepo::delete(&pool, todo.id).await.unwrap();

    let (is_deleted, updated_at): (bool, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as("SELECT is_deleted, updated_at FROM todos WHERE id = $1")
            .bind(todo.id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(is_deleted);
    assert!(Some(updated_at) >= todo.updated_at.get());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_is_idempotent(pool: PgPool) {
    let todo = create(&pool, "Twice", "").await;

    assert!(TodoRepo::delete(&pool, todo.id).await.unwrap());
    assert!(!TodoRepo::delete(&pool, todo.id).await.unwrap());
    assert!(!TodoRepo::delete(&pool, 123_456).await.unwrap());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_without_criteria_matches_find_all(pool: PgPool) {
    create(&pool, "One", "").await;
    create(&pool, "Two", "").await;
    let deleted = create(&pool, "Three", "").await;
    TodoRepo::delete(&pool, deleted.id).await.unwrap();

    let all = TodoRepo::find_all(&pool).await.unwrap();
    let searched = TodoRepo::search(&pool, &TodoSearch::default()).await.unwrap();

    assert_eq!(ids(&all), ids(&searched));
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_title_is_case_insensitive_substring(pool: PgPool) {
    let a = create(&pool, "Search Test Todo", "").await;
    let b = create(&pool, "another SEARCH hit", "").await;
    create(&pool, "Unrelated", "").await;

    let found = TodoRepo::search(
        &pool,
        &TodoSearch {
            title: Some("search".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(ids(&found), BTreeSet::from([a.id, b.id]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_description(pool: PgPool) {
    let hit = create(&pool, "A", "needs Review before merge").await;
    create(&pool, "B", "nothing here").await;

    let found = TodoRepo::search(
        &pool,
        &TodoSearch {
            description: Some("review".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(ids(&found), BTreeSet::from([hit.id]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_completed_false_is_a_real_filter(pool: PgPool) {
    let open = create(&pool, "Open", "").await;
    let done = create(&pool, "Done", "").await;
    TodoRepo::update(
        &pool,
        done.id,
        &UpdateTodo {
            title: "Done".to_string(),
            completed: true,
        },
    )
    .await
    .unwrap();

    let incomplete = TodoRepo::search(
        &pool,
        &TodoSearch {
            completed: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(ids(&incomplete), BTreeSet::from([open.id]));

    let complete = TodoRepo::search(
        &pool,
        &TodoSearch {
            completed: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(ids(&complete), BTreeSet::from([done.id]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_multiple_conditions_are_conjunctive(pool: PgPool) {
    let sprint = SprintRepo::create(
        &pool,
        &CreateSprint {
            title: "Sprint".to_string(),
        },
    )
    .await
    .unwrap();

    let target = TodoRepo::create(&pool, &new_todo("Fix login bug", "", Some(sprint.id)))
        .await
        .unwrap();
    // Same title, no sprint.
    TodoRepo::create(&pool, &new_todo("Fix logout bug", "", None))
        .await
        .unwrap();
    // Same sprint, different title.
    TodoRepo::create(&pool, &new_todo("Write tests", "", Some(sprint.id)))
        .await
        .unwrap();

    let found = TodoRepo::search(
        &pool,
        &TodoSearch {
            title: Some("bug".to_string()),
            completed: Some(false),
            sprint_id: Some(sprint.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(ids(&found), BTreeSet::from([target.id]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let literal = create(&pool, "Discount 50% off", "").await;
    create(&pool, "Discount 50 dollars off", "").await;

    let found = TodoRepo::search(
        &pool,
        &TodoSearch {
            title: Some("50%".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(ids(&found), BTreeSet::from([literal.id]));
}
