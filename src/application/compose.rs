use std::sync::Arc;

use metrics::counter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::audit::{ACTION_POST_SUBMIT, AuditService};
use crate::application::inflight::{AlreadyRunning, InFlight};
use crate::application::latency::SimulatedLatency;
use crate::application::repos::{
    CreatePostParams, PostContent, PostListFilter, PostsRepo, PostsWriteRepo, RepoError,
    TransitionPostParams, UpdateDraftParams,
};
use crate::domain::entities::{Identity, ImageAttachment, PostId, PostRecord};
use crate::domain::error::DomainError;
use crate::domain::posts::{estimate_read_time, parse_tags};
use crate::domain::types::{Category, PostStatus};
use crate::domain::workflow::{Transition, WorkflowError};

pub const METRIC_COMPOSE_SUBMISSIONS: &str = "inkpost_compose_submissions_total";

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("{MISSING_FIELDS_MESSAGE}")]
    MissingFields { field: &'static str },
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("post {0} not found")]
    NotFound(PostId),
    #[error("post {id} is not editable in status `{status}`")]
    NotEditable { id: PostId, status: PostStatus },
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    InProgress(#[from] AlreadyRunning),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for ComposeError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Transition(inner) => Self::Workflow(inner),
            RepoError::NotEditable { id, status } => Self::NotEditable { id, status },
            other => Self::Repo(other),
        }
    }
}

/// Raw composer input. `category` is a label or slug, `tags` comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostFields {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: String,
    pub featured_image: Option<ImageAttachment>,
    pub content_images: Vec<ImageAttachment>,
}

impl PostFields {
    /// Required-field check in form order.
    fn ensure_complete(&self) -> Result<(), ComposeError> {
        for (field, value) in [
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("content", &self.content),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(ComposeError::MissingFields { field });
            }
        }
        Ok(())
    }

    fn into_content(self) -> Result<PostContent, ComposeError> {
        let category = match self.category.trim() {
            "" => None,
            raw => Some(Category::parse(raw).ok_or_else(|| DomainError::unknown_category(raw))?),
        };

        Ok(PostContent {
            read_time_minutes: estimate_read_time(&self.content),
            tags: parse_tags(&self.tags),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category,
            featured_image: self.featured_image,
            content_images: self.content_images,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuthorCounts {
    pub total: usize,
    pub published: usize,
    pub pending: usize,
    pub draft: usize,
    pub rejected: usize,
}

impl AuthorCounts {
    fn tally(posts: &[PostRecord]) -> Self {
        let mut counts = Self {
            total: posts.len(),
            ..Self::default()
        };
        for post in posts {
            match post.status {
                PostStatus::Published => counts.published += 1,
                PostStatus::Pending => counts.pending += 1,
                PostStatus::Draft => counts.draft += 1,
                PostStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone)]
pub struct AuthorDashboard {
    pub posts: Vec<PostRecord>,
    pub counts: AuthorCounts,
}

/// Author-side writes: drafts, submissions and the author's own dashboard.
#[derive(Clone)]
pub struct ComposeService {
    reader: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
    audit: AuditService,
    inflight: InFlight<String>,
    latency: SimulatedLatency,
}

impl ComposeService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        audit: AuditService,
        latency: SimulatedLatency,
    ) -> Self {
        Self {
            reader,
            writer,
            audit,
            inflight: InFlight::new(),
            latency,
        }
    }

    pub async fn dashboard(&self, author: &Identity) -> Result<AuthorDashboard, ComposeError> {
        let posts = self
            .reader
            .list_posts(&PostListFilter::by_author(author.name.as_str()))
            .await?;
        let counts = AuthorCounts::tally(&posts);
        Ok(AuthorDashboard { posts, counts })
    }

    /// Store the fields as a draft. Nothing is required.
    pub async fn save_draft(
        &self,
        author: &Identity,
        fields: PostFields,
    ) -> Result<PostRecord, ComposeError> {
        let content = fields.into_content()?;
        self.create(author, PostStatus::Draft, content).await
    }

    pub async fn submit_for_review(
        &self,
        author: &Identity,
        fields: PostFields,
    ) -> Result<PostRecord, ComposeError> {
        fields.ensure_complete()?;
        let content = fields.into_content()?;
        self.create(author, PostStatus::Pending, content).await
    }

    /// Replace the content of one of the author's own drafts.
    pub async fn update_draft(
        &self,
        author: &Identity,
        id: PostId,
        fields: PostFields,
    ) -> Result<PostRecord, ComposeError> {
        let content = fields.into_content()?;
        let existing = self.own_post(author, id).await?;
        if existing.status != PostStatus::Draft {
            return Err(ComposeError::NotEditable {
                id,
                status: existing.status,
            });
        }

        let _guard = self.inflight.acquire(author.name.clone())?;
        self.latency.wait().await;

        Ok(self
            .writer
            .update_draft(UpdateDraftParams { id, content })
            .await?)
    }

    /// Move one of the author's drafts into the review queue.
    pub async fn submit_draft(
        &self,
        author: &Identity,
        id: PostId,
    ) -> Result<PostRecord, ComposeError> {
        let existing = self.own_post(author, id).await?;
        if existing.status != PostStatus::Draft {
            return Err(WorkflowError::InvalidTransition {
                from: existing.status,
                transition: Transition::Submit,
            }
            .into());
        }

        let fields = PostFields {
            title: existing.title,
            excerpt: existing.excerpt,
            content: existing.content,
            category: existing
                .category
                .map(|category| category.label().to_string())
                .unwrap_or_default(),
            ..PostFields::default()
        };
        fields.ensure_complete()?;

        let _guard = self.inflight.acquire(author.name.clone())?;
        self.latency.wait().await;

        let post = self
            .writer
            .transition_post(TransitionPostParams {
                id,
                transition: Transition::Submit,
                at: OffsetDateTime::now_utc(),
                feedback: None,
            })
            .await?;
        self.record_submission(author, &post).await?;

        Ok(post)
    }

    async fn create(
        &self,
        author: &Identity,
        status: PostStatus,
        content: PostContent,
    ) -> Result<PostRecord, ComposeError> {
        let _guard = self.inflight.acquire(author.name.clone())?;
        self.latency.wait().await;

        let post = self
            .writer
            .create_post(CreatePostParams {
                author: author.name.clone(),
                status,
                content,
            })
            .await?;

        if status == PostStatus::Pending {
            self.record_submission(author, &post).await?;
        } else {
            info!(
                target = "inkpost::application::compose",
                post_id = post.id,
                author = %author.name,
                "draft saved"
            );
        }

        Ok(post)
    }

    async fn record_submission(
        &self,
        author: &Identity,
        post: &PostRecord,
    ) -> Result<(), ComposeError> {
        self.audit
            .record(&author.name, ACTION_POST_SUBMIT, post.id, None)
            .await?;
        counter!(METRIC_COMPOSE_SUBMISSIONS).increment(1);
        info!(
            target = "inkpost::application::compose",
            post_id = post.id,
            author = %author.name,
            "post submitted for review"
        );
        Ok(())
    }

    /// Another author's post is reported as missing.
    async fn own_post(&self, author: &Identity, id: PostId) -> Result<PostRecord, ComposeError> {
        self.reader
            .find_post(id)
            .await?
            .filter(|post| post.author == author.name)
            .ok_or(ComposeError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PostFields {
        PostFields {
            title: "Title".into(),
            excerpt: "Excerpt".into(),
            content: "Body".into(),
            category: "react".into(),
            tags: "a, b".into(),
            ..PostFields::default()
        }
    }

    #[test]
    fn missing_fields_reported_in_form_order() {
        let mut fields = complete();
        fields.excerpt = " ".into();
        fields.category = String::new();
        assert!(matches!(
            fields.ensure_complete(),
            Err(ComposeError::MissingFields { field: "excerpt" })
        ));
        assert!(complete().ensure_complete().is_ok());
    }

    #[test]
    fn content_parses_category_and_tags() {
        let content = complete().into_content().expect("content");
        assert_eq!(content.category, Some(Category::React));
        assert_eq!(content.tags, ["a", "b"]);
        assert_eq!(content.read_time_minutes, 1);
    }

    #[test]
    fn blank_category_is_allowed_but_unknown_is_not() {
        let mut fields = complete();
        fields.category = "  ".into();
        assert_eq!(fields.into_content().expect("content").category, None);

        let mut fields = complete();
        fields.category = "Gardening".into();
        assert!(matches!(
            fields.into_content(),
            Err(ComposeError::Invalid(DomainError::UnknownCategory { .. }))
        ));
    }

    #[test]
    fn counts_tally_by_status() {
        let posts = crate::domain::posts::data::seed_posts();
        let counts = AuthorCounts::tally(&posts);
        assert_eq!(
            counts,
            AuthorCounts {
                total: 9,
                published: 6,
                pending: 2,
                draft: 1,
                rejected: 0,
            }
        );
    }
}
