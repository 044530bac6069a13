//! List routes.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::{ApiError, parse_id};
use crate::models::{List, ListInput};
use crate::state::AppState;

/// `GET /api/lists`: every live list, without todos.
pub async fn list_lists(State(state): State<AppState>) -> Result<Json<Vec<List>>, ApiError> {
    Ok(Json(state.lists.get_all().await?))
}

/// `GET /api/lists/:id`: one list with its todos.
pub async fn get_list(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<List>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id, "list")?;
    Ok(Json(state.lists.get_by_id(id).await?))
}

/// `POST /api/lists`: create a list.
pub async fn create_list(
    State(state): State<AppState>,
    body: Result<Json<ListInput>, JsonRejection>,
) -> Result<(StatusCode, Json<List>), ApiError> {
    let Json(input) = body?;
    let list = state.lists.create(&input).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// `PUT /api/lists/:id`: replace a list's name.
pub async fn update_list(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<ListInput>, JsonRejection>,
) -> Result<Json<List>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id, "list")?;
    let Json(input) = body?;
    Ok(Json(state.lists.update(id, &input).await?))
}

/// `DELETE /api/lists/:id`: soft-delete a list. Its todos are left in place.
pub async fn delete_list(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id, "list")?;
    state.lists.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
