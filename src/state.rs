//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries the two data-access services; both share one SQLite pool.
//! The todo service sits behind `Arc<dyn TodoService>` so tests can inject
//! an in-memory implementation.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::list::ListService;
use crate::services::todo::{SqliteTodoService, TodoService};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub lists: ListService,
    pub todos: Arc<dyn TodoService>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        let todos = Arc::new(SqliteTodoService::new(pool.clone()));
        Self::with_todo_service(pool, todos)
    }

    #[must_use]
    pub fn with_todo_service(pool: SqlitePool, todos: Arc<dyn TodoService>) -> Self {
        Self { lists: ListService::new(pool), todos }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
