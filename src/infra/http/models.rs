use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::session::{Engagement, EngagementKind};
use crate::domain::entities::{Identity, PostId};
use crate::domain::posts::ALL_CATEGORIES;
use crate::domain::types::Role;
use crate::presentation::views::{ImageView, ManagedPostView};

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl FeedQuery {
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORIES)
    }

    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or("newest")
    }
}

#[derive(Debug, Serialize)]
pub struct LoginPageResponse {
    pub roles: [Role; 2],
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub identity: Option<Identity>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub identity: Option<Identity>,
    pub engagement: Engagement,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub post_id: PostId,
    pub kind: EngagementKind,
    pub active: bool,
    /// Likes as this session sees them.
    pub likes: u64,
}

#[derive(Debug, Serialize)]
pub struct PostWriteResponse {
    pub post: ManagedPostView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub image: ImageView,
}
