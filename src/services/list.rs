//! List service: CRUD over the `lists` table.
//!
//! DESIGN
//! ======
//! Each operation is a single parameterized statement; there are no
//! multi-statement transactions. Delete is a soft delete and never cascades
//! to the list's todos.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use time::OffsetDateTime;
use tracing::info;

use super::todo::{TODO_COLUMNS, todo_from_row};
use super::{ServiceError, validate_list};
use crate::models::{List, ListInput};

const LIST_COLUMNS: &str = "id, name, created_at, updated_at, deleted_at";

/// Map a `lists` row selected with [`LIST_COLUMNS`].
pub(crate) fn list_from_row(row: &SqliteRow) -> Result<List, sqlx::Error> {
    Ok(List {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        todos: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

#[derive(Clone)]
pub struct ListService {
    pool: SqlitePool,
}

impl ListService {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All live lists in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_all(&self) -> Result<Vec<List>, ServiceError> {
        let rows = sqlx::query(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(list_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    /// One live list with its live todos preloaded.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live row has this id.
    pub async fn get_by_id(&self, id: i64) -> Result<List, ServiceError> {
        let mut list = self.find(id).await?.ok_or_else(|| ServiceError::list_not_found(id))?;

        let rows = sqlx::query(&format!(
            "SELECT {TODO_COLUMNS} FROM todos t
             WHERE t.list_id = ? AND t.deleted_at IS NULL
             ORDER BY t.id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        list.todos = rows
            .iter()
            .map(|row| todo_from_row(row, None))
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(list)
    }

    /// Insert a new list. The store assigns `id` and both timestamps.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a blank name, or a database error if the insert fails.
    pub async fn create(&self, input: &ListInput) -> Result<List, ServiceError> {
        validate_list(input)?;

        let now = OffsetDateTime::now_utc();
        let id = sqlx::query("INSERT INTO lists (name, created_at, updated_at) VALUES (?, ?, ?)")
            .bind(&input.name)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        info!(list_id = id, "list created");
        self.find(id).await?.ok_or_else(|| ServiceError::list_not_found(id))
    }

    /// Replace the mutable fields of a live list and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a blank name, `NotFound` if no live row has this
    /// id, or a database error.
    pub async fn update(&self, id: i64, input: &ListInput) -> Result<List, ServiceError> {
        validate_list(input)?;

        let result = sqlx::query("UPDATE lists SET name = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(&input.name)
            .bind(OffsetDateTime::now_utc())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::list_not_found(id));
        }

        self.find(id).await?.ok_or_else(|| ServiceError::list_not_found(id))
    }

    /// Soft-delete a list. Unknown or already-deleted ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("UPDATE lists SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(OffsetDateTime::now_utc())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(list_id = id, "list deleted");
        }
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Option<List>, ServiceError> {
        let row = sqlx::query(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(list_from_row).transpose()?)
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
