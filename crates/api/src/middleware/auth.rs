//! Authorization middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use todo_core::todo::TodoRepository;
use todo_shared::OwnerId;

use crate::AppState;

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "Unauthorized"
        })),
    )
        .into_response()
}

/// Authorization middleware.
///
/// Runs the authorizer on the `Authorization` header. On Allow, stores the
/// principal as the request's [`OwnerId`]; on Deny, answers 403 without detail.
pub async fn auth_middleware<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let decision = state.authorizer.authorize(auth_header);
    if !decision.is_allowed() {
        return forbidden();
    }

    request
        .extensions_mut()
        .insert(OwnerId::new(decision.principal_id));
    next.run(request).await
}

/// Extractor for the authorized owner.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let owner_id = auth.owner_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub OwnerId);

impl AuthUser {
    /// Returns the owner the request acts for.
    #[must_use]
    pub fn owner_id(&self) -> &OwnerId {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OwnerId>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(forbidden)
    }
}
