//! Persisted entities and request payloads.
//!
//! DESIGN
//! ======
//! `List` and `Todo` mirror the `lists` and `todos` tables and are what the
//! API returns. Request bodies decode into the narrower `ListInput` /
//! `TodoInput` payloads so server-assigned fields (`id`, timestamps) sent by a
//! client are ignored rather than trusted.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================================
// LIST
// =============================================================================

/// A named collection of todos. Mirrors the `lists` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: i64,
    pub name: String,
    /// Only populated by single-list reads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub todos: Vec<Todo>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

// =============================================================================
// TODO
// =============================================================================

/// A single todo item. Mirrors the `todos` table, plus the eager-loaded parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(rename = "listId")]
    pub list_id: i64,
    /// `None` when the parent list has been soft-deleted.
    #[serde(default)]
    pub list: Option<List>,
    pub done: bool,
    /// Free text; never parsed as a date.
    pub due: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Body of `POST /api/lists` and `PUT /api/lists/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListInput {
    #[serde(default)]
    pub name: String,
}

/// Body of `POST /api/todos` and `PUT /api/todos/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "listId", default)]
    pub list_id: i64,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub due: String,
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
