use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, post},
};

use crate::domain::entities::{Identity, PostId};
use crate::presentation::views::{AdminDashboardView, ManagedPostView};

use super::error::ApiError;
use super::extract::ApiJson;
use super::models::RejectRequest;
use super::session::require_admin;
use super::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/posts/{id}/approve", post(approve))
        .route("/admin/posts/{id}/reject", post(reject))
        .route_layer(middleware::from_fn(require_admin))
}

fn parse_id(raw: &str) -> Result<PostId, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found("Post not found"))
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardView>, ApiError> {
    let dashboard = state.review.dashboard().await?;
    Ok(Json(AdminDashboardView::from(&dashboard)))
}

pub async fn approve(
    State(state): State<AppState>,
    Extension(admin): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<ManagedPostView>, ApiError> {
    let id = parse_id(&id)?;
    let post = state.review.approve(&admin.name, id).await?;
    Ok(Json(ManagedPostView::from(&post)))
}

pub async fn reject(
    State(state): State<AppState>,
    Extension(admin): Extension<Identity>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<RejectRequest>,
) -> Result<Json<ManagedPostView>, ApiError> {
    let id = parse_id(&id)?;
    let post = state
        .review
        .reject(&admin.name, id, &payload.feedback)
        .await?;
    Ok(Json(ManagedPostView::from(&post)))
}
