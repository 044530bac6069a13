//! Todo service: CRUD over the `todos` table with the parent list preloaded.
//!
//! DESIGN
//! ======
//! Route handlers depend on the [`TodoService`] trait rather than the SQLite
//! implementation, so handler tests can swap in an in-memory double. Reads
//! eager-load the parent list with a `LEFT JOIN`; a soft-deleted parent
//! leaves `list` empty while the todo itself stays readable.
//!
//! Create and update reject a `listId` that does not name a live list.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use time::OffsetDateTime;
use tracing::info;

use super::{ServiceError, validate_todo};
use crate::models::{List, Todo, TodoInput};

/// Todo columns, aliased so the names are stable under joins.
pub(crate) const TODO_COLUMNS: &str = "t.id AS id, t.title AS title, t.list_id AS list_id, t.done AS done, \
     t.due AS due, t.created_at AS created_at, t.updated_at AS updated_at, t.deleted_at AS deleted_at";

const JOINED_LIST_COLUMNS: &str = "l.id AS list_ref_id, l.name AS list_name, \
     l.created_at AS list_created_at, l.updated_at AS list_updated_at";

/// Map a row selected with [`TODO_COLUMNS`], attaching an already-resolved list.
pub(crate) fn todo_from_row(row: &SqliteRow, list: Option<List>) -> Result<Todo, sqlx::Error> {
    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        list_id: row.try_get("list_id")?,
        list,
        done: row.try_get("done")?,
        due: row.try_get("due")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

/// Map the `LEFT JOIN lists` half of a todo row. `None` when no live list matched.
fn joined_list_from_row(row: &SqliteRow) -> Result<Option<List>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<i64>, _>("list_ref_id")? else {
        return Ok(None);
    };
    Ok(Some(List {
        id,
        name: row.try_get("list_name")?,
        todos: Vec::new(),
        created_at: row.try_get("list_created_at")?,
        updated_at: row.try_get("list_updated_at")?,
        deleted_at: None,
    }))
}

fn todo_with_list_from_row(row: &SqliteRow) -> Result<Todo, sqlx::Error> {
    let list = joined_list_from_row(row)?;
    todo_from_row(row, list)
}

// =============================================================================
// CAPABILITY
// =============================================================================

/// Todo CRUD operations. Enables mocking in handler tests.
#[async_trait::async_trait]
pub trait TodoService: Send + Sync {
    /// All live todos in insertion order, each with its parent list.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    async fn get_all(&self) -> Result<Vec<Todo>, ServiceError>;

    /// One live todo with its parent list.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live row has this id.
    async fn get_by_id(&self, id: i64) -> Result<Todo, ServiceError>;

    /// Insert a new todo.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a missing field or unknown list, or a database error.
    async fn create(&self, input: TodoInput) -> Result<Todo, ServiceError>;

    /// Replace every mutable field of a live todo.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a missing field or unknown list, `NotFound` if no
    /// live row has this id, or a database error.
    async fn update(&self, id: i64, input: TodoInput) -> Result<Todo, ServiceError>;

    /// Soft-delete a todo. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

// =============================================================================
// SQLITE IMPLEMENTATION
// =============================================================================

pub struct SqliteTodoService {
    pool: SqlitePool,
}

impl SqliteTodoService {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_list_exists(&self, list_id: i64) -> Result<(), ServiceError> {
        let found = sqlx::query("SELECT 1 FROM lists WHERE id = ? AND deleted_at IS NULL")
            .bind(list_id)
            .fetch_optional(&self.pool)
            .await?;

        if found.is_none() {
            return Err(ServiceError::Invalid(format!("list {list_id} does not exist")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TodoService for SqliteTodoService {
    async fn get_all(&self) -> Result<Vec<Todo>, ServiceError> {
        let rows = sqlx::query(&format!(
            "SELECT {TODO_COLUMNS}, {JOINED_LIST_COLUMNS}
             FROM todos t
             LEFT JOIN lists l ON l.id = t.list_id AND l.deleted_at IS NULL
             WHERE t.deleted_at IS NULL
             ORDER BY t.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(todo_with_list_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Todo, ServiceError> {
        let row = sqlx::query(&format!(
            "SELECT {TODO_COLUMNS}, {JOINED_LIST_COLUMNS}
             FROM todos t
             LEFT JOIN lists l ON l.id = t.list_id AND l.deleted_at IS NULL
             WHERE t.id = ? AND t.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::todo_not_found(id))?;

        Ok(todo_with_list_from_row(&row)?)
    }

    async fn create(&self, input: TodoInput) -> Result<Todo, ServiceError> {
        validate_todo(&input)?;
        self.ensure_list_exists(input.list_id).await?;

        let now = OffsetDateTime::now_utc();
        let id = sqlx::query(
            "INSERT INTO todos (title, list_id, done, due, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.title)
        .bind(input.list_id)
        .bind(input.done)
        .bind(&input.due)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(todo_id = id, list_id = input.list_id, "todo created");
        self.get_by_id(id).await
    }

    async fn update(&self, id: i64, input: TodoInput) -> Result<Todo, ServiceError> {
        validate_todo(&input)?;
        self.ensure_list_exists(input.list_id).await?;

        let result = sqlx::query(
            "UPDATE todos SET title = ?, list_id = ?, done = ?, due = ?, updated_at = ?
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&input.title)
        .bind(input.list_id)
        .bind(input.done)
        .bind(&input.due)
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::todo_not_found(id));
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("UPDATE todos SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(OffsetDateTime::now_utc())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(todo_id = id, "todo deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "todo_test.rs"]
mod tests;
