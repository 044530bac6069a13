//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the `/api` REST endpoints for lists and todos, the
//! health check, and the cross-origin policy for the local web UI. It also
//! owns the JSON error envelope every failing handler returns.

pub mod lists;
pub mod todos;

use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::services::ServiceError;
use crate::state::AppState;

const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Full application router: `/api` routes plus CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/{id}",
            get(todos::get_todo).put(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/lists", get(lists::list_lists).post(lists::create_list))
        .route(
            "/lists/{id}",
            get(lists::get_list).put(lists::update_list).delete(lists::delete_list),
        )
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION])
        .expose_headers([CONTENT_LENGTH])
        .allow_credentials(true)
}

/// `GET /api/health`: fixed liveness acknowledgment.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Server is running" }))
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error response rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

pub(crate) fn service_error_to_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = service_error_to_status(&err);
        if status.is_server_error() {
            error!(error = %err, "storage operation failed");
        }
        Self { status, message: err.to_string() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Parse an `{id}` path segment as a non-negative integer that fits the
/// store's key type. Only plain ASCII digits are accepted; no sign.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    Some(raw)
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse::<u64>().ok())
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| ApiError::bad_request(format!("Invalid {entity} ID")))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
