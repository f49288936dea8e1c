use async_trait::async_trait;
use time::OffsetDateTime;

use crate::application::repos::{
    CreatePostParams, PostListFilter, PostsRepo, PostsWriteRepo, RepoError, TransitionPostParams,
    UpdateDraftParams,
};
use crate::domain::entities::{PostId, PostRecord};
use crate::domain::types::PostStatus;
use crate::domain::workflow::{self, Transition};

use super::MemoryRepositories;

#[async_trait]
impl PostsRepo for MemoryRepositories {
    async fn list_posts(&self, filter: &PostListFilter) -> Result<Vec<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        let mut selected: Vec<PostRecord> = posts
            .iter()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect();
        selected.sort_by_key(|post| post.id);
        Ok(selected)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let CreatePostParams {
            author,
            status,
            content,
        } = params;

        let now = OffsetDateTime::now_utc();
        let post = PostRecord {
            id: self.allocate_id(),
            title: content.title,
            excerpt: content.excerpt,
            content: content.content,
            author,
            category: content.category,
            tags: content.tags,
            status,
            created_at: now,
            published_at: (status == PostStatus::Published).then_some(now),
            featured_image: content.featured_image,
            content_images: content.content_images,
            featured: false,
            read_time_minutes: content.read_time_minutes,
            likes: 0,
            comments: 0,
            review_feedback: None,
        };

        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update_draft(&self, params: UpdateDraftParams) -> Result<PostRecord, RepoError> {
        let UpdateDraftParams { id, content } = params;

        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(RepoError::NotFound)?;
        if post.status != PostStatus::Draft {
            return Err(RepoError::NotEditable {
                id,
                status: post.status,
            });
        }

        post.title = content.title;
        post.excerpt = content.excerpt;
        post.content = content.content;
        post.category = content.category;
        post.tags = content.tags;
        post.featured_image = content.featured_image;
        post.content_images = content.content_images;
        post.read_time_minutes = content.read_time_minutes;

        Ok(post.clone())
    }

    async fn transition_post(
        &self,
        params: TransitionPostParams,
    ) -> Result<PostRecord, RepoError> {
        let TransitionPostParams {
            id,
            transition,
            at,
            feedback,
        } = params;

        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(RepoError::NotFound)?;

        workflow::apply(post, transition, at)?;
        if transition == Transition::Reject {
            post.review_feedback = feedback;
        }

        Ok(post.clone())
    }
}
