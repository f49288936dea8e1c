//! Serialisable views returned by the HTTP surface.
//!
//! Views are built from repository records plus the viewer's engagement, so a
//! like shows up only for the session that made it.

use serde::Serialize;
use time::OffsetDateTime;

use crate::application::compose::{AuthorCounts, AuthorDashboard};
use crate::application::feed::{HomeSummary, PostDetail};
use crate::application::review::ReviewDashboard;
use crate::application::session::Engagement;
use crate::domain::entities::{Identity, ImageAttachment, PostId, PostRecord};
use crate::domain::filters::FilterPreset;
use crate::domain::types::{Category, PostStatus};

#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub source: String,
    pub filter: String,
    pub css_filter: &'static str,
}

impl From<&ImageAttachment> for ImageView {
    fn from(image: &ImageAttachment) -> Self {
        Self {
            source: image.source.clone(),
            filter: image.filter_name().to_string(),
            css_filter: image.css_filter(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCardView {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: Option<Category>,
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    pub read_time: String,
    pub likes: u64,
    pub comments: u64,
    pub liked: bool,
    pub bookmarked: bool,
    pub image: Option<ImageView>,
}

impl PostCardView {
    pub fn build(post: &PostRecord, engagement: &Engagement) -> Self {
        let liked = engagement.has_liked(post.id);
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            category: post.category,
            tags: post.tags.clone(),
            published_at: post.published_at,
            read_time: read_time_label(post.read_time_minutes),
            likes: displayed_likes(post.likes, liked),
            comments: post.comments,
            liked,
            bookmarked: engagement.has_bookmarked(post.id),
            image: post.featured_image.as_ref().map(ImageView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailView {
    #[serde(flatten)]
    pub card: PostCardView,
    pub content: String,
    pub content_images: Vec<ImageView>,
    pub related: Vec<PostCardView>,
}

impl PostDetailView {
    pub fn build(detail: &PostDetail, engagement: &Engagement) -> Self {
        Self {
            card: PostCardView::build(&detail.post, engagement),
            content: detail.post.content.clone(),
            content_images: detail
                .post
                .content_images
                .iter()
                .map(ImageView::from)
                .collect(),
            related: cards(&detail.related, engagement),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub search: String,
    pub category: String,
    pub sort: String,
    pub total: usize,
    pub posts: Vec<PostCardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub label: &'static str,
    pub slug: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub featured: Vec<PostCardView>,
    pub categories: Vec<CategoryView>,
    pub published_count: usize,
}

impl HomeView {
    pub fn build(summary: &HomeSummary, engagement: &Engagement) -> Self {
        Self {
            featured: cards(&summary.featured, engagement),
            categories: summary
                .categories
                .iter()
                .map(|category| CategoryView {
                    label: category.label(),
                    slug: category.slug(),
                })
                .collect(),
            published_count: summary.published_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterView {
    pub name: String,
    pub css: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterCatalogView {
    pub filters: &'static [FilterPreset],
}

/// Author-facing row; carries workflow state rather than engagement.
#[derive(Debug, Clone, Serialize)]
pub struct ManagedPostView {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: Option<Category>,
    pub tags: Vec<String>,
    pub status: PostStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    pub read_time: String,
    pub review_feedback: Option<String>,
    pub image: Option<ImageView>,
}

impl From<&PostRecord> for ManagedPostView {
    fn from(post: &PostRecord) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            category: post.category,
            tags: post.tags.clone(),
            status: post.status,
            created_at: post.created_at,
            published_at: post.published_at,
            read_time: read_time_label(post.read_time_minutes),
            review_feedback: post.review_feedback.clone(),
            image: post.featured_image.as_ref().map(ImageView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorDashboardView {
    pub author: String,
    pub counts: AuthorCounts,
    pub posts: Vec<ManagedPostView>,
}

impl AuthorDashboardView {
    pub fn build(author: &Identity, dashboard: &AuthorDashboard) -> Self {
        Self {
            author: author.name.clone(),
            counts: dashboard.counts,
            posts: dashboard.posts.iter().map(ManagedPostView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminStatsView {
    pub pending: usize,
    pub approved_today: u64,
    pub rejected_today: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboardView {
    pub stats: AdminStatsView,
    pub pending: Vec<ManagedPostView>,
}

impl From<&ReviewDashboard> for AdminDashboardView {
    fn from(dashboard: &ReviewDashboard) -> Self {
        Self {
            stats: AdminStatsView {
                pending: dashboard.pending_count(),
                approved_today: dashboard.approved_today,
                rejected_today: dashboard.rejected_today,
            },
            pending: dashboard.pending.iter().map(ManagedPostView::from).collect(),
        }
    }
}

pub fn cards(posts: &[PostRecord], engagement: &Engagement) -> Vec<PostCardView> {
    posts
        .iter()
        .map(|post| PostCardView::build(post, engagement))
        .collect()
}

/// Repository count plus one when the viewer has liked the post.
pub fn displayed_likes(likes: u64, liked: bool) -> u64 {
    likes.saturating_add(u64::from(liked))
}

pub fn read_time_label(minutes: u32) -> String {
    format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::posts::data;

    #[test]
    fn card_reflects_viewer_like_without_touching_record() {
        let post = data::seed_posts().remove(0);
        let mut engagement = Engagement::default();

        let card = PostCardView::build(&post, &engagement);
        assert_eq!(card.likes, 124);
        assert!(!card.liked);

        engagement.liked.insert(post.id);
        let card = PostCardView::build(&post, &engagement);
        assert_eq!(card.likes, 125);
        assert!(card.liked);
        assert_eq!(post.likes, 124);
    }

    #[test]
    fn card_carries_resolved_filter_css() {
        let post = data::seed_posts().remove(0);
        let card = PostCardView::build(&post, &Engagement::default());
        let image = card.image.expect("seeded image");
        assert_eq!(image.filter, "Bright");
        assert_eq!(image.css_filter, "brightness(1.3) contrast(1.1)");
        assert_eq!(card.read_time, "5 min read");
    }
}
