//! Inline image uploads encoded as data URLs.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

use crate::domain::entities::ImageAttachment;
use crate::domain::filters::DEFAULT_FILTER;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    EmptyPayload,
    #[error("`{content_type}` is not an image type")]
    NotAnImage { content_type: String },
}

/// A decoded upload ready to attach to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub attachment: ImageAttachment,
}

/// Encode `bytes` as a `data:` URL attachment with the default filter.
///
/// A declared content type wins; otherwise it is guessed from the file name.
pub fn encode_image(
    file_name: &str,
    declared_type: Option<&str>,
    bytes: &[u8],
) -> Result<EncodedImage, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::EmptyPayload);
    }

    let content_type = declared_type
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != OCTET_STREAM)
        .map(str::to_string)
        .unwrap_or_else(|| {
            mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        });

    if !content_type.starts_with("image/") {
        return Err(UploadError::NotAnImage { content_type });
    }

    let source = format!("data:{content_type};base64,{}", STANDARD.encode(bytes));
    Ok(EncodedImage {
        file_name: file_name.to_string(),
        size_bytes: bytes.len(),
        attachment: ImageAttachment::new(source, Some(DEFAULT_FILTER)),
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_is_encoded_with_normal_filter() {
        let encoded = encode_image("cover.png", None, &[0x89, b'P', b'N', b'G']).expect("encode");
        assert_eq!(encoded.content_type, "image/png");
        assert_eq!(encoded.size_bytes, 4);
        assert_eq!(encoded.attachment.source, "data:image/png;base64,iVBORw==");
        assert_eq!(encoded.attachment.filter_name(), "Normal");
    }

    #[test]
    fn declared_type_overrides_extension() {
        let encoded = encode_image("blob", Some("image/webp"), b"RIFF").expect("encode");
        assert!(encoded.attachment.source.starts_with("data:image/webp;base64,"));
    }

    #[test]
    fn octet_stream_falls_back_to_guess() {
        let encoded =
            encode_image("photo.jpg", Some("application/octet-stream"), b"jpeg").expect("encode");
        assert_eq!(encoded.content_type, "image/jpeg");
    }

    #[test]
    fn non_images_and_empty_files_are_refused() {
        assert_eq!(
            encode_image("notes.txt", None, b"hello"),
            Err(UploadError::NotAnImage {
                content_type: "text/plain".to_string()
            })
        );
        assert_eq!(
            encode_image("cover.png", None, &[]),
            Err(UploadError::EmptyPayload)
        );
    }
}
