use axum::extract::{FromRequest, rejection::JsonRejection};

use super::error::{ApiError, codes};

/// `Json` body extractor whose rejections use the API error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            rejection.status(),
            codes::INVALID_BODY,
            "Invalid request body",
            Some(rejection.body_text()),
        )
    }
}
