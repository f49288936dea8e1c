//! Post review state machine.
//!
//! `draft -> pending -> {published, rejected}`. Decided posts never return to
//! the queue.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::{entities::PostRecord, types::PostStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Submit,
    Approve,
    Reject,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Approve => "approve",
            Transition::Reject => "reject",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("cannot {transition} a {from} post")]
    InvalidTransition {
        from: PostStatus,
        transition: Transition,
    },
}

/// Target status for `transition` out of `from`, if the table allows it.
pub fn next_status(from: PostStatus, transition: Transition) -> Result<PostStatus, WorkflowError> {
    match (from, transition) {
        (PostStatus::Draft, Transition::Submit) => Ok(PostStatus::Pending),
        (PostStatus::Pending, Transition::Approve) => Ok(PostStatus::Published),
        (PostStatus::Pending, Transition::Reject) => Ok(PostStatus::Rejected),
        _ => Err(WorkflowError::InvalidTransition { from, transition }),
    }
}

/// Apply `transition` to `post`, keeping `published_at` in step with the status.
pub fn apply(
    post: &mut PostRecord,
    transition: Transition,
    now: OffsetDateTime,
) -> Result<(), WorkflowError> {
    let status = next_status(post.status, transition)?;
    post.status = status;
    post.published_at = (status == PostStatus::Published).then_some(now);
    Ok(())
}
