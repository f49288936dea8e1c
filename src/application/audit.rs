use std::sync::Arc;

use time::{OffsetDateTime, Time};

use crate::application::repos::{AuditRepo, RepoError};
use crate::domain::entities::{AuditRecord, PostId};

pub const ACTION_POST_SUBMIT: &str = "post.submit";
pub const ACTION_POST_APPROVE: &str = "post.approve";
pub const ACTION_POST_REJECT: &str = "post.reject";

/// Thin wrapper around the audit repository for workflow decisions.
#[derive(Clone)]
pub struct AuditService {
    repo: Arc<dyn AuditRepo>,
}

impl AuditService {
    pub fn new(repo: Arc<dyn AuditRepo>) -> Self {
        Self { repo }
    }

    pub async fn record(
        &self,
        actor: &str,
        action: &str,
        post_id: PostId,
        detail: Option<&str>,
    ) -> Result<(), RepoError> {
        let record = AuditRecord {
            actor: actor.to_string(),
            action: action.to_string(),
            post_id,
            detail: detail.map(str::to_string),
            created_at: OffsetDateTime::now_utc(),
        };

        self.repo.append_log(record).await
    }

    /// Number of `action` entries recorded since midnight UTC of `now`'s day.
    pub async fn count_today(&self, action: &str, now: OffsetDateTime) -> Result<u64, RepoError> {
        let midnight = now.replace_time(Time::MIDNIGHT);
        let records = self.repo.list_since(midnight).await?;
        Ok(records
            .iter()
            .filter(|record| record.action == action)
            .count() as u64)
    }
}
