//! To-do item routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::Serialize;
use todo_core::todo::{CreateTodoRequest, TodoItem, TodoRepository, UpdateTodoRequest};
use todo_shared::TodoId;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the item routes.
pub fn routes<R: TodoRepository + 'static>() -> Router<AppState<R>> {
    Router::new()
        .route("/todos", get(list_todos::<R>).post(create_todo::<R>))
        .route(
            "/todos/{item_id}",
            patch(update_todo::<R>).delete(delete_todo::<R>),
        )
        .route(
            "/todos/{item_id}/attachment",
            post(generate_upload_url::<R>),
        )
}

/// Response for listing items.
#[derive(Debug, Serialize)]
pub struct ListTodosResponse {
    /// The caller's items.
    pub items: Vec<TodoItem>,
}

/// Response for a created item.
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    /// The stored item.
    pub item: TodoItem,
}

/// Response for an upload URL request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Presigned URL to PUT the attachment to.
    pub upload_url: String,
}

/// GET `/todos`
async fn list_todos<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    auth: AuthUser,
) -> Result<Json<ListTodosResponse>, ApiError> {
    let items = state.todos.list_todos(auth.owner_id()).await?;
    Ok(Json(ListTodosResponse { items }))
}

/// POST `/todos`
async fn create_todo<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    auth: AuthUser,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let Json(request) = payload?;
    let item = state.todos.create_todo(request, auth.owner_id()).await?;
    Ok((StatusCode::CREATED, Json(TodoResponse { item })))
}

/// PATCH `/todos/{item_id}`
async fn update_todo<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    auth: AuthUser,
    Path(item_id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state
        .todos
        .update_todo(request, auth.owner_id(), &TodoId::new(item_id))
        .await?;
    Ok(StatusCode::OK)
}

/// DELETE `/todos/{item_id}`
async fn delete_todo<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    auth: AuthUser,
    Path(item_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .todos
        .delete_todo(auth.owner_id(), &TodoId::new(item_id))
        .await?;
    Ok(StatusCode::OK)
}

/// POST `/todos/{item_id}/attachment`
async fn generate_upload_url<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    auth: AuthUser,
    Path(item_id): Path<String>,
) -> Result<Json<UploadUrlResponse>, ApiError> {
    let urls = state
        .todos
        .generate_upload_url(&TodoId::new(item_id), auth.owner_id())
        .await?;
    Ok(Json(UploadUrlResponse {
        upload_url: urls.upload_url,
    }))
}
