use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::session::CurrentSession;
use crate::domain::types::Role;

use super::error::ApiError;
use super::extract::ApiJson;
use super::models::{LoginPageResponse, LoginRequest, MeResponse, SessionResponse};
use super::session::require_session;
use super::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    let authenticated = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/auth/session", post(open_session))
        .route("/auth/login", get(login_page).post(login))
        .merge(authenticated)
}

/// Where guards send unauthenticated requests.
pub async fn login_page() -> Json<LoginPageResponse> {
    Json(LoginPageResponse {
        roles: [Role::Author, Role::Admin],
    })
}

/// Reader session without an identity, used for likes and bookmarks.
pub async fn open_session(State(state): State<AppState>) -> impl IntoResponse {
    let token = state.sessions.open_anonymous();
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            identity: None,
        }),
    )
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, identity) = state.sessions.login(&payload.name, payload.role)?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            identity: Some(identity),
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> StatusCode {
    state.sessions.logout(session.token);
    StatusCode::NO_CONTENT
}

pub async fn me(Extension(session): Extension<CurrentSession>) -> Json<MeResponse> {
    Json(MeResponse {
        identity: session.identity,
        engagement: session.engagement,
    })
}
