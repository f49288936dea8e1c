//! In-memory repository implementations backing every surface.

mod audit;
mod posts;

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::RwLock;

use crate::domain::entities::{AuditRecord, PostId, PostRecord};
use crate::domain::posts::data;

#[derive(Clone, Default)]
pub struct MemoryRepositories {
    posts: Arc<RwLock<Vec<PostRecord>>>,
    audit: Arc<RwLock<Vec<AuditRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryRepositories {
    /// Empty store, or one holding the sample posts when `seed` is set.
    pub fn new(seed: bool) -> Self {
        let posts = if seed { data::seed_posts() } else { Vec::new() };
        Self::with_posts(posts)
    }

    pub fn with_posts(posts: Vec<PostRecord>) -> Self {
        let next_id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
        Self {
            posts: Arc::new(RwLock::new(posts)),
            audit: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(next_id)),
        }
    }

    fn allocate_id(&self) -> PostId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub async fn post_count(&self) -> usize {
        self.posts.read().await.len()
    }
}
