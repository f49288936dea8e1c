use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::compose::{ComposeError, MISSING_FIELDS_MESSAGE};
use crate::application::error::ErrorReport;
use crate::application::feed::FeedError;
use crate::application::repos::RepoError;
use crate::application::review::{MISSING_FEEDBACK_MESSAGE, ReviewError};
use crate::application::session::SessionError;
use crate::infra::uploads::UploadError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const UNKNOWN_SESSION: &str = "unknown_session";
    pub const MISSING_FIELDS: &str = "missing_fields";
    pub const MISSING_FEEDBACK: &str = "missing_feedback";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const INVALID_BODY: &str = "invalid_body";
    pub const INVALID_TRANSITION: &str = "invalid_transition";
    pub const NOT_EDITABLE: &str = "not_editable";
    pub const IN_PROGRESS: &str = "in_progress";
    pub const UPLOAD: &str = "upload_error";
    pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
        }
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn conflict(code: &'static str, message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, message, hint)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hint = self.hint.clone();
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(
            "infra::http",
            self.status,
            format!("{}: {}", self.code, hint.as_deref().unwrap_or(self.message)),
        )
        .attach(&mut response);
        response
    }
}

fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::NotFound => ApiError::not_found("Post not found"),
        RepoError::Transition(err) => ApiError::conflict(
            codes::INVALID_TRANSITION,
            "Post cannot make that transition",
            Some(err.to_string()),
        ),
        RepoError::NotEditable { .. } => ApiError::conflict(
            codes::NOT_EDITABLE,
            "Only drafts can be edited",
            Some(err.to_string()),
        ),
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::NotFound => ApiError::not_found("Post not found"),
            FeedError::Repo(err) => repo_to_api(err),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::MissingFeedback => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::MISSING_FEEDBACK,
                MISSING_FEEDBACK_MESSAGE,
                None,
            ),
            ReviewError::NotFound(_) => ApiError::not_found("Post not found"),
            ReviewError::Workflow(err) => ApiError::conflict(
                codes::INVALID_TRANSITION,
                "Post is not awaiting review",
                Some(err.to_string()),
            ),
            ReviewError::InProgress(err) => ApiError::conflict(
                codes::IN_PROGRESS,
                "operation already in progress",
                Some(err.to_string()),
            ),
            ReviewError::Repo(err) => repo_to_api(err),
        }
    }
}

impl From<ComposeError> for ApiError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::MissingFields { field } => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::MISSING_FIELDS,
                MISSING_FIELDS_MESSAGE,
                Some(format!("`{field}` is required")),
            ),
            ComposeError::Invalid(err) => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::INVALID_INPUT,
                "Invalid post fields",
                Some(err.to_string()),
            ),
            ComposeError::NotFound(_) => ApiError::not_found("Post not found"),
            ComposeError::NotEditable { .. } => ApiError::conflict(
                codes::NOT_EDITABLE,
                "Only drafts can be edited",
                Some(err.to_string()),
            ),
            ComposeError::Workflow(err) => ApiError::conflict(
                codes::INVALID_TRANSITION,
                "Post cannot be submitted",
                Some(err.to_string()),
            ),
            ComposeError::InProgress(err) => ApiError::conflict(
                codes::IN_PROGRESS,
                "operation already in progress",
                Some(err.to_string()),
            ),
            ComposeError::Repo(err) => repo_to_api(err),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Unknown => ApiError::new(
                StatusCode::UNAUTHORIZED,
                codes::UNKNOWN_SESSION,
                "Session not found",
                None,
            ),
            SessionError::MissingName => ApiError::bad_request(
                "Display name is required",
                Some(err.to_string()),
            ),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::UPLOAD,
            "Upload rejected",
            Some(err.to_string()),
        )
    }
}
