//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::entities::{AuditRecord, ImageAttachment, PostId, PostRecord};
use crate::domain::types::{Category, PostStatus};
use crate::domain::workflow::{Transition, WorkflowError};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Transition(#[from] WorkflowError),
    #[error("post {id} is not editable in status `{status}`")]
    NotEditable { id: PostId, status: PostStatus },
}

#[derive(Debug, Clone, Default)]
pub struct PostListFilter {
    pub status: Option<PostStatus>,
    pub author: Option<String>,
}

impl PostListFilter {
    pub fn published() -> Self {
        Self::with_status(PostStatus::Published)
    }

    pub fn with_status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            author: None,
        }
    }

    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            status: None,
            author: Some(author.into()),
        }
    }

    pub fn matches(&self, post: &PostRecord) -> bool {
        self.status.is_none_or(|status| post.status == status)
            && self
                .author
                .as_deref()
                .is_none_or(|author| post.author == author)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostContent {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Option<Category>,
    pub tags: Vec<String>,
    pub featured_image: Option<ImageAttachment>,
    pub content_images: Vec<ImageAttachment>,
    pub read_time_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub author: String,
    pub status: PostStatus,
    pub content: PostContent,
}

#[derive(Debug, Clone)]
pub struct UpdateDraftParams {
    pub id: PostId,
    pub content: PostContent,
}

#[derive(Debug, Clone)]
pub struct TransitionPostParams {
    pub id: PostId,
    pub transition: Transition,
    pub at: OffsetDateTime,
    pub feedback: Option<String>,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Posts matching `filter`, in id order.
    async fn list_posts(&self, filter: &PostListFilter) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_post(&self, id: PostId) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    /// Replace the content of a draft. Any other status is refused.
    async fn update_draft(&self, params: UpdateDraftParams) -> Result<PostRecord, RepoError>;

    /// Apply a workflow transition atomically against the stored status.
    async fn transition_post(&self, params: TransitionPostParams)
    -> Result<PostRecord, RepoError>;
}

#[async_trait]
pub trait AuditRepo: Send + Sync {
    async fn append_log(&self, record: AuditRecord) -> Result<(), RepoError>;

    /// Records created at or after `since`, oldest first.
    async fn list_since(&self, since: OffsetDateTime) -> Result<Vec<AuditRecord>, RepoError>;
}
