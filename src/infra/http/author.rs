use axum::{
    Extension, Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State, multipart::MultipartError,
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use tracing::{error, info};

use crate::application::compose::PostFields;
use crate::domain::entities::{Identity, PostId};
use crate::infra::uploads::encode_image;
use crate::presentation::views::{AuthorDashboardView, ImageView, ManagedPostView};

use super::error::{ApiError, codes};
use super::extract::ApiJson;
use super::models::{PostWriteResponse, UploadResponse};
use super::session::require_author;
use super::state::AppState;

pub const AUTHOR_DASHBOARD_PATH: &str = "/author/dashboard";

const UPLOAD_FIELD: &str = "file";

pub(super) fn routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(AUTHOR_DASHBOARD_PATH, get(dashboard))
        .route("/author/posts/draft", post(save_draft))
        .route("/author/posts/submit", post(submit_for_review))
        .route("/author/posts/{id}", put(update_draft))
        .route("/author/posts/{id}/submit", post(submit_draft))
        .route(
            "/author/uploads",
            post(upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn(require_author))
}

fn parse_id(raw: &str) -> Result<PostId, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found("Post not found"))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(author): Extension<Identity>,
) -> Result<Json<AuthorDashboardView>, ApiError> {
    let dashboard = state.compose.dashboard(&author).await?;
    Ok(Json(AuthorDashboardView::build(&author, &dashboard)))
}

pub async fn save_draft(
    State(state): State<AppState>,
    Extension(author): Extension<Identity>,
    ApiJson(fields): ApiJson<PostFields>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.compose.save_draft(&author, fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostWriteResponse {
            post: ManagedPostView::from(&post),
            redirect: None,
        }),
    ))
}

pub async fn submit_for_review(
    State(state): State<AppState>,
    Extension(author): Extension<Identity>,
    ApiJson(fields): ApiJson<PostFields>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.compose.submit_for_review(&author, fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostWriteResponse {
            post: ManagedPostView::from(&post),
            redirect: Some(AUTHOR_DASHBOARD_PATH),
        }),
    ))
}

pub async fn update_draft(
    State(state): State<AppState>,
    Extension(author): Extension<Identity>,
    Path(id): Path<String>,
    ApiJson(fields): ApiJson<PostFields>,
) -> Result<Json<PostWriteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let post = state.compose.update_draft(&author, id, fields).await?;
    Ok(Json(PostWriteResponse {
        post: ManagedPostView::from(&post),
        redirect: None,
    }))
}

pub async fn submit_draft(
    State(state): State<AppState>,
    Extension(author): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<PostWriteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let post = state.compose.submit_draft(&author, id).await?;
    Ok(Json(PostWriteResponse {
        post: ManagedPostView::from(&post),
        redirect: Some(AUTHOR_DASHBOARD_PATH),
    }))
}

/// Accept one image in the `file` field and hand it back as a data URL.
pub async fn upload_image(
    Extension(author): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return Err(multipart_error(err)),
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "upload.bin".to_string());
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let encoded = encode_image(&file_name, content_type.as_deref(), &bytes)?;
        info!(
            target = "inkpost::http::author::uploads",
            author = %author.name,
            file_name = %encoded.file_name,
            content_type = %encoded.content_type,
            size_bytes = encoded.size_bytes,
            "image encoded"
        );

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                image: ImageView::from(&encoded.attachment),
                file_name: encoded.file_name,
                content_type: encoded.content_type,
                size_bytes: encoded.size_bytes,
            }),
        ));
    }

    Err(ApiError::bad_request(
        "Missing upload",
        Some(format!("expected a `{UPLOAD_FIELD}` field")),
    ))
}

fn multipart_error(err: MultipartError) -> ApiError {
    let status = err.status();
    error!(
        target = "inkpost::http::author::uploads",
        status = status.as_u16(),
        error = %err,
        "failed to read multipart payload"
    );
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(
            status,
            codes::PAYLOAD_TOO_LARGE,
            "Upload exceeds the size limit",
            None,
        )
    } else {
        ApiError::bad_request("Invalid multipart payload", Some(err.body_text()))
    }
}
