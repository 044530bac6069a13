use std::sync::Arc;

use super::*;
use crate::routes::app;
use crate::services::todo::TodoService;
use crate::state::test_helpers::{self, MemoryTodoService, dummy_todo};
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app_with(service: MemoryTodoService) -> Router {
    let todos: Arc<dyn TodoService> = Arc::new(service);
    app(test_helpers::test_app_state_with_todos(todos).await)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[tokio::test]
async fn list_todos_returns_service_rows() {
    let app = app_with(MemoryTodoService::with_todos(vec![
        dummy_todo(1, "Test Todo 1"),
        Todo { done: true, due: "2024-12-26".into(), ..dummy_todo(2, "Test Todo 2") },
    ]))
    .await;

    let (status, body) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    let todos: Vec<Todo> = serde_json::from_value(body).unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].title, "Test Todo 1");
    assert!(todos[1].done);
}

#[tokio::test]
async fn list_todos_storage_error_is_500() {
    let app = app_with(MemoryTodoService::failing()).await;
    let (status, body) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("database error"));
}

#[tokio::test]
async fn create_todo_returns_201() {
    let app = app_with(MemoryTodoService::default()).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/todos",
        Some(json!({ "title": "New Todo", "listId": 1, "due": "2024-12-25", "done": false })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let todo: Todo = serde_json::from_value(body).unwrap();
    assert_eq!(todo.title, "New Todo");
    assert_eq!(todo.id, 1);
}

#[tokio::test]
async fn create_todo_storage_error_is_500() {
    let app = app_with(MemoryTodoService::failing()).await;
    let (status, _) =
        send(&app, "POST", "/api/todos", Some(json!({ "title": "X", "listId": 1, "due": "today" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_todo_missing_title_is_400() {
    let app = app_with(MemoryTodoService::default()).await;
    let (status, body) = send(&app, "POST", "/api/todos", Some(json!({ "listId": 1, "due": "today" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");
}

#[tokio::test]
async fn create_todo_wrong_field_type_is_400() {
    let app = app_with(MemoryTodoService::default()).await;
    let (status, body) =
        send(&app, "POST", "/api/todos", Some(json!({ "title": "X", "listId": "one", "due": "today" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_todo_without_content_type_is_400() {
    let app = app_with(MemoryTodoService::default()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/todos")
        .body(Body::from(r#"{"title":"X","listId":1,"due":"today"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_todo_non_numeric_id_is_400() {
    let app = app_with(MemoryTodoService::default()).await;
    let (status, body) = send(&app, "GET", "/api/todos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid todo ID");
}

#[tokio::test]
async fn get_todo_unknown_is_404() {
    let app = app_with(MemoryTodoService::default()).await;
    let (status, _) = send(&app, "GET", "/api/todos/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_uses_path_id() {
    let app = app_with(MemoryTodoService::with_todos(vec![dummy_todo(3, "Before")])).await;
    let (status, body) = send(
        &app,
        "PUT",
        "/api/todos/3",
        Some(json!({ "id": 100, "title": "After", "listId": 2, "due": "monday", "done": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
    assert_eq!(body["title"], "After");
    assert_eq!(body["listId"], 2);
    assert_eq!(body["done"], true);
}

#[tokio::test]
async fn update_todo_malformed_body_is_400() {
    let app = app_with(MemoryTodoService::with_todos(vec![dummy_todo(3, "Before")])).await;
    let request = Request::builder()
        .method("PUT")
        .uri("/api/todos/3")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("[1,2"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_todo_unknown_is_404() {
    let app = app_with(MemoryTodoService::default()).await;
    let (status, _) =
        send(&app, "PUT", "/api/todos/4", Some(json!({ "title": "Ghost", "listId": 1, "due": "never" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_is_204_then_404() {
    let app = app_with(MemoryTodoService::with_todos(vec![dummy_todo(1, "Bye")])).await;

    let (status, body) = send(&app, "DELETE", "/api/todos/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, "GET", "/api/todos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_storage_error_is_500() {
    let app = app_with(MemoryTodoService::failing()).await;
    let (status, _) = send(&app, "DELETE", "/api/todos/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_todo_bad_id_is_400() {
    let app = app_with(MemoryTodoService::default()).await;
    let (status, _) = send(&app, "DELETE", "/api/todos/-3", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
