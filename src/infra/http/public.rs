use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::session::{CurrentSession, Engagement, EngagementKind};
use crate::domain::filters;
use crate::domain::posts::PostQuery;
use crate::presentation::views::{
    self, FeedView, FilterCatalogView, FilterView, HomeView, PostDetailView,
};

use super::error::ApiError;
use super::models::{FeedQuery, ToggleResponse};
use super::session::{SessionContext, require_session};
use super::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    let engagement = Router::new()
        .route("/blog/{id}/like", post(toggle_like))
        .route("/blog/{id}/bookmark", post(toggle_bookmark))
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/", get(home))
        .route("/blog", get(feed))
        .route("/blog/{id}", get(post_detail))
        .route("/filters", get(filter_catalog))
        .route("/filters/{name}", get(resolve_filter))
        .route("/_health", get(health))
        .merge(engagement)
}

fn engagement_of(ctx: &SessionContext) -> Engagement {
    ctx.0
        .as_ref()
        .map(|session| session.engagement.clone())
        .unwrap_or_default()
}

pub async fn home(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<HomeView>, ApiError> {
    let summary = state.feed.home().await?;
    Ok(Json(HomeView::build(&summary, &engagement_of(&ctx))))
}

pub async fn feed(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedView>, ApiError> {
    let post_query = PostQuery::new(
        Some(query.search()),
        Some(query.category()),
        Some(query.sort()),
    );
    let posts = state.feed.list(&post_query).await?;
    let cards = views::cards(&posts, &engagement_of(&ctx));

    Ok(Json(FeedView {
        search: query.search().to_string(),
        category: query.category().to_string(),
        sort: query.sort().to_string(),
        total: cards.len(),
        posts: cards,
    }))
}

pub async fn post_detail(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<PostDetailView>, ApiError> {
    let detail = state.feed.detail(&id).await?;
    Ok(Json(PostDetailView::build(&detail, &engagement_of(&ctx))))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    toggle(&state, &session, &id, EngagementKind::Like).await
}

pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    toggle(&state, &session, &id, EngagementKind::Bookmark).await
}

async fn toggle(
    state: &AppState,
    session: &CurrentSession,
    raw_id: &str,
    kind: EngagementKind,
) -> Result<Json<ToggleResponse>, ApiError> {
    let post = state.feed.lookup(raw_id).await?;

    let engagement = state.sessions.toggle(session.token, kind, post.id)?;

    Ok(Json(ToggleResponse {
        post_id: post.id,
        kind,
        active: engagement.contains(kind, post.id),
        likes: views::displayed_likes(post.likes, engagement.has_liked(post.id)),
    }))
}

pub async fn filter_catalog() -> Json<FilterCatalogView> {
    Json(FilterCatalogView {
        filters: filters::catalog(),
    })
}

/// Unknown names resolve to the identity filter rather than failing.
pub async fn resolve_filter(Path(name): Path<String>) -> Json<FilterView> {
    let css = filters::resolve_css(&name);
    Json(FilterView { name, css })
}

pub async fn health() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
