//! Session resolution and role guards.
//!
//! Guards are a presentation concern: a failed check redirects to the login
//! page instead of answering with an error body.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;
use uuid::Uuid;

use crate::application::session::CurrentSession;
use crate::domain::types::Role;

use super::state::AppState;

pub const LOGIN_PATH: &str = "/auth/login";
pub const SESSION_HEADER: &str = "x-session-token";

/// Session resolved for the current request, if any.
///
/// Guards additionally insert the `CurrentSession` and its `Identity`.
#[derive(Debug, Clone, Default)]
pub struct SessionContext(pub Option<CurrentSession>);

/// Session token from `Authorization: Bearer` or the session header.
pub fn session_token(headers: &HeaderMap) -> Option<Uuid> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let raw = bearer.or_else(|| {
        headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
    })?;
    Uuid::parse_str(raw.trim()).ok()
}

pub async fn attach_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let current = session_token(request.headers())
        .and_then(|token| state.sessions.resolve(token).ok());
    request.extensions_mut().insert(SessionContext(current));
    next.run(request).await
}

pub async fn require_session(request: Request<Body>, next: Next) -> Response {
    guard(request, next, None).await
}

pub async fn require_author(request: Request<Body>, next: Next) -> Response {
    guard(request, next, Some(Role::Author)).await
}

pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    guard(request, next, Some(Role::Admin)).await
}

async fn guard(mut request: Request<Body>, next: Next, role: Option<Role>) -> Response {
    let current = request
        .extensions()
        .get::<SessionContext>()
        .and_then(|ctx| ctx.0.clone());

    let allowed = match (&current, role) {
        (Some(_), None) => true,
        (Some(session), Some(role)) => session.has_role(role),
        (None, _) => false,
    };

    match current {
        Some(session) if allowed => {
            if let Some(identity) = session.identity.clone() {
                request.extensions_mut().insert(identity);
            }
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        _ => {
            debug!(
                target = "inkpost::http::guard",
                path = %request.uri().path(),
                required = role.map(Role::as_str).unwrap_or("session"),
                "redirecting to login"
            );
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}
