//! JSON HTTP surface.

pub mod admin;
pub mod auth;
pub mod author;
pub mod error;
pub mod extract;
mod middleware;
pub mod models;
pub mod public;
pub mod session;
mod state;

pub use author::AUTHOR_DASHBOARD_PATH;
pub use session::LOGIN_PATH;
pub use state::AppState;

use axum::{Router, middleware as axum_middleware};

use self::error::ApiError;
use self::middleware::{log_responses, set_request_context};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.upload_limit;

    Router::new()
        .merge(public::routes())
        .merge(auth::routes())
        .merge(author::routes(upload_limit))
        .merge(admin::routes())
        .fallback(fallback)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session::attach_session,
        ))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn fallback() -> ApiError {
    ApiError::not_found("Route not found")
}
