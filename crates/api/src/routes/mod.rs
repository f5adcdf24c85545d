//! API route definitions.

use axum::{Router, middleware};
use todo_core::todo::TodoRepository;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod health;
pub mod todos;

/// Creates the API router; item routes sit behind the authorizer.
pub fn api_routes_with_state<R: TodoRepository + 'static>(
    state: AppState<R>,
) -> Router<AppState<R>> {
    let protected_routes = Router::new()
        .merge(todos::routes())
        .layer(middleware::from_fn_with_state(
            state,
            auth_middleware::<R>,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
