//! Domain entities held by the repositories.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{
    filters,
    types::{Category, PostStatus, Role},
};

pub type PostId = u64;

/// An image reference together with the preset chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub source: String,
    /// `None` means no filter was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ImageAttachment {
    pub fn new(source: impl Into<String>, filter: Option<&str>) -> Self {
        Self {
            source: source.into(),
            filter: filter.map(str::to_string),
        }
    }

    pub fn filter_name(&self) -> &str {
        self.filter.as_deref().unwrap_or(filters::DEFAULT_FILTER)
    }

    pub fn css_filter(&self) -> &'static str {
        filters::resolve_css(self.filter_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: Option<Category>,
    pub tags: Vec<String>,
    pub status: PostStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    pub featured_image: Option<ImageAttachment>,
    pub content_images: Vec<ImageAttachment>,
    pub featured: bool,
    pub read_time_minutes: u32,
    pub likes: u64,
    pub comments: u64,
    pub review_feedback: Option<String>,
}

impl PostRecord {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Who is acting on the service. Not verified against anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub actor: String,
    pub action: String,
    pub post_id: PostId,
    pub detail: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_without_filter_renders_as_normal() {
        let image = ImageAttachment::new("/images/a.png", None);
        assert_eq!(image.filter_name(), "Normal");
        assert_eq!(image.css_filter(), "none");
    }

    #[test]
    fn attachment_with_unknown_filter_renders_identity() {
        let image = ImageAttachment::new("/images/a.png", Some("Polaroid"));
        assert_eq!(image.filter_name(), "Polaroid");
        assert_eq!(image.css_filter(), "none");
    }

    #[test]
    fn attachment_resolves_known_filter() {
        let image = ImageAttachment::new("/images/a.png", Some("Cool"));
        assert_eq!(image.css_filter(), "hue-rotate(180deg) saturate(1.2)");
    }
}
