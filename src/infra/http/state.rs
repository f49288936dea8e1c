use std::sync::Arc;

use crate::application::audit::AuditService;
use crate::application::compose::ComposeService;
use crate::application::feed::FeedService;
use crate::application::latency::SimulatedLatency;
use crate::application::review::ReviewService;
use crate::application::session::SessionService;
use crate::infra::memory::MemoryRepositories;

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedService>,
    pub review: Arc<ReviewService>,
    pub compose: Arc<ComposeService>,
    pub sessions: SessionService,
    pub upload_limit: usize,
}

impl AppState {
    /// Wire every service to one shared in-memory store.
    pub fn in_memory(
        repos: MemoryRepositories,
        latency: SimulatedLatency,
        upload_limit: usize,
    ) -> Self {
        let repos = Arc::new(repos);
        let audit = AuditService::new(repos.clone());

        Self {
            feed: Arc::new(FeedService::new(repos.clone())),
            review: Arc::new(ReviewService::new(
                repos.clone(),
                repos.clone(),
                audit.clone(),
                latency,
            )),
            compose: Arc::new(ComposeService::new(
                repos.clone(),
                repos,
                audit,
                latency,
            )),
            sessions: SessionService::new(),
            upload_limit,
        }
    }

    pub fn with_sessions(mut self, sessions: SessionService) -> Self {
        self.sessions = sessions;
        self
    }
}
