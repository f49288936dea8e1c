use std::sync::Arc;

use thiserror::Error;

use crate::application::repos::{PostListFilter, PostsRepo, RepoError};
use crate::domain::entities::{PostId, PostRecord};
use crate::domain::posts::{self, PostQuery};
use crate::domain::types::Category;

/// Related posts shown alongside a detail view.
pub const RELATED_LIMIT: usize = 2;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct HomeSummary {
    pub featured: Vec<PostRecord>,
    pub categories: &'static [Category],
    pub published_count: usize,
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostRecord,
    pub related: Vec<PostRecord>,
}

/// Read side of the public surface. Only published posts are ever returned.
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostsRepo>,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostsRepo>) -> Self {
        Self { posts }
    }

    pub async fn home(&self) -> Result<HomeSummary, FeedError> {
        let published = self.published().await?;
        Ok(HomeSummary {
            featured: posts::featured(&published).into_iter().cloned().collect(),
            categories: &Category::ALL,
            published_count: published.len(),
        })
    }

    pub async fn list(&self, query: &PostQuery) -> Result<Vec<PostRecord>, FeedError> {
        let published = self.published().await?;
        Ok(posts::query(&published, query).into_iter().cloned().collect())
    }

    /// Non-numeric ids are treated as missing posts.
    pub async fn detail(&self, raw_id: &str) -> Result<PostDetail, FeedError> {
        let post = self.lookup(raw_id).await?;

        let published = self.published().await?;
        let related = posts::related(&published, &post, RELATED_LIMIT)
            .into_iter()
            .cloned()
            .collect();

        Ok(PostDetail { post, related })
    }

    /// Published post addressed by a raw path segment.
    pub async fn lookup(&self, raw_id: &str) -> Result<PostRecord, FeedError> {
        let id: PostId = raw_id.trim().parse().map_err(|_| FeedError::NotFound)?;
        self.ensure_published(id).await
    }

    pub async fn ensure_published(&self, id: PostId) -> Result<PostRecord, FeedError> {
        self.posts
            .find_post(id)
            .await?
            .filter(PostRecord::is_published)
            .ok_or(FeedError::NotFound)
    }

    async fn published(&self) -> Result<Vec<PostRecord>, FeedError> {
        Ok(self.posts.list_posts(&PostListFilter::published()).await?)
    }
}
