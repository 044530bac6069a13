//! Data-access services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the SQL and the minimal validation so route handlers
//! can stay focused on protocol translation. Every read filters out
//! soft-deleted rows (`deleted_at IS NOT NULL`).

pub mod list;
pub mod todo;

use crate::models::{ListInput, TodoInput};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub(crate) fn list_not_found(id: i64) -> Self {
        Self::NotFound { entity: "list", id }
    }

    pub(crate) fn todo_not_found(id: i64) -> Self {
        Self::NotFound { entity: "todo", id }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Reject list payloads without a name.
///
/// # Errors
///
/// Returns `Invalid` when `name` is blank.
pub fn validate_list(input: &ListInput) -> Result<(), ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Invalid("name is required".into()));
    }
    Ok(())
}

/// Reject todo payloads missing a title, due text, or parent list.
///
/// # Errors
///
/// Returns `Invalid` naming the first missing field.
pub fn validate_todo(input: &TodoInput) -> Result<(), ServiceError> {
    if input.title.trim().is_empty() {
        return Err(ServiceError::Invalid("title is required".into()));
    }
    if input.due.trim().is_empty() {
        return Err(ServiceError::Invalid("due is required".into()));
    }
    if input.list_id <= 0 {
        return Err(ServiceError::Invalid("listId is required".into()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
