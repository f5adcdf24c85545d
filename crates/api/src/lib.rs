//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST routes for the to-do actions
//! - Authorization middleware enforcing the bearer-token authorizer
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use todo_core::auth::Authorizer;
use todo_core::todo::{TodoRepository, TodoService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState<R: TodoRepository> {
    /// Business logic over the item repository.
    pub todos: Arc<TodoService<R>>,
    /// Authorizer guarding every item route.
    pub authorizer: Arc<Authorizer>,
}

impl<R: TodoRepository> AppState<R> {
    /// Create the application state.
    #[must_use]
    pub fn new(todos: TodoService<R>, authorizer: Authorizer) -> Self {
        Self {
            todos: Arc::new(todos),
            authorizer: Arc::new(authorizer),
        }
    }
}

impl<R: TodoRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            todos: Arc::clone(&self.todos),
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

/// Creates the main application router.
pub fn create_router<R: TodoRepository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
