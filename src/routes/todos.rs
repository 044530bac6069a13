//! Todo routes.
//!
//! Handlers only see the `TodoService` trait object held in `AppState`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::{ApiError, parse_id};
use crate::models::{Todo, TodoInput};
use crate::state::AppState;

/// `GET /api/todos`: every live todo with its list.
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.todos.get_all().await?))
}

/// `GET /api/todos/:id`: one todo with its list.
pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id, "todo")?;
    Ok(Json(state.todos.get_by_id(id).await?))
}

/// `POST /api/todos`: create a todo.
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = body?;
    let todo = state.todos.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PUT /api/todos/:id`: replace every mutable field of a todo.
pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id, "todo")?;
    let Json(input) = body?;
    Ok(Json(state.todos.update(id, input).await?))
}

/// `DELETE /api/todos/:id`: soft-delete a todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id, "todo")?;
    state.todos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "todos_test.rs"]
mod tests;
