//! Admin review decisions over the pending queue.
//!
//! Each decision is checked up front, then held behind a per-post in-flight
//! guard for the simulated round trip before the repository applies it.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::audit::{ACTION_POST_APPROVE, ACTION_POST_REJECT, AuditService};
use crate::application::inflight::{AlreadyRunning, InFlight};
use crate::application::latency::SimulatedLatency;
use crate::application::repos::{
    PostListFilter, PostsRepo, PostsWriteRepo, RepoError, TransitionPostParams,
};
use crate::domain::entities::{PostId, PostRecord};
use crate::domain::types::PostStatus;
use crate::domain::workflow::{self, Transition, WorkflowError};

pub const METRIC_REVIEW_DECISIONS: &str = "inkpost_review_decisions_total";

pub const MISSING_FEEDBACK_MESSAGE: &str = "Please provide feedback for rejection";

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{MISSING_FEEDBACK_MESSAGE}")]
    MissingFeedback,
    #[error("post {0} not found")]
    NotFound(PostId),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    InProgress(#[from] AlreadyRunning),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for ReviewError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Transition(inner) => Self::Workflow(inner),
            other => Self::Repo(other),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn transition(self) -> Transition {
        match self {
            Decision::Approve => Transition::Approve,
            Decision::Reject => Transition::Reject,
        }
    }

    fn action(self) -> &'static str {
        match self {
            Decision::Approve => ACTION_POST_APPROVE,
            Decision::Reject => ACTION_POST_REJECT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewDashboard {
    pub pending: Vec<PostRecord>,
    pub approved_today: u64,
    pub rejected_today: u64,
}

impl ReviewDashboard {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[derive(Clone)]
pub struct ReviewService {
    reader: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
    audit: AuditService,
    inflight: InFlight<PostId>,
    latency: SimulatedLatency,
}

impl ReviewService {
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

    /// Pending posts in id order.
    pub async fn pending_queue(&self) -> Result<Vec<PostRecord>, ReviewError> {
        Ok(self
            .reader
            .list_posts(&PostListFilter::with_status(PostStatus::Pending))
            .await?)
    }

    pub async fn dashboard(&self) -> Result<ReviewDashboard, ReviewError> {
        let now = OffsetDateTime::now_utc();
        let pending = self.pending_queue().await?;
        let approved_today = self.audit.count_today(ACTION_POST_APPROVE, now).await?;
        let rejected_today = self.audit.count_today(ACTION_POST_REJECT, now).await?;

        Ok(ReviewDashboard {
            pending,
            approved_today,
            rejected_today,
        })
    }

    pub async fn approve(&self, actor: &str, id: PostId) -> Result<PostRecord, ReviewError> {
        self.decide(actor, id, Decision::Approve, None).await
    }

    /// Reject a pending post. Blank feedback is refused before anything else.
    pub async fn reject(
        &self,
        actor: &str,
        id: PostId,
        feedback: &str,
    ) -> Result<PostRecord, ReviewError> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(ReviewError::MissingFeedback);
        }
        self.decide(actor, id, Decision::Reject, Some(feedback))
            .await
    }

    async fn decide(
        &self,
        actor: &str,
        id: PostId,
        decision: Decision,
        feedback: Option<&str>,
    ) -> Result<PostRecord, ReviewError> {
        let transition = decision.transition();
        let current = self
            .reader
            .find_post(id)
            .await?
            .ok_or(ReviewError::NotFound(id))?;
        workflow::next_status(current.status, transition)?;

        let _guard = self.inflight.acquire(id)?;
        self.latency.wait().await;

        let post = self
            .writer
            .transition_post(TransitionPostParams {
                id,
                transition,
                at: OffsetDateTime::now_utc(),
                feedback: feedback.map(str::to_string),
            })
            .await?;

        self.audit.record(actor, decision.action(), id, feedback).await?;

        counter!(METRIC_REVIEW_DECISIONS, "decision" => transition.as_str()).increment(1);
        info!(
            target = "inkpost::application::review",
            post_id = id,
            actor,
            decision = transition.as_str(),
            status = post.status.as_str(),
            "review decision applied"
        );

        Ok(post)
    }

    pub fn is_deciding(&self, id: PostId) -> bool {
        self.inflight.is_running(&id)
    }
}
