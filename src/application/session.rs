//! Session store replacing the browser-local `{name, role}` record.
//!
//! A session is an opaque token mapped to an optional identity plus the
//! reader's liked and bookmarked post sets. Nothing here authenticates anyone;
//! the role is whatever the caller claimed at login. Sessions idle for longer
//! than the configured timeout are dropped.

use std::{
    collections::BTreeSet,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    entities::{Identity, PostId},
    types::Role,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown session")]
    Unknown,
    #[error("display name must not be empty")]
    MissingName,
}

/// Per-session engagement state. Never copied into the post counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Engagement {
    pub liked: BTreeSet<PostId>,
    pub bookmarked: BTreeSet<PostId>,
}

impl Engagement {
    pub fn has_liked(&self, id: PostId) -> bool {
        self.liked.contains(&id)
    }

    pub fn has_bookmarked(&self, id: PostId) -> bool {
        self.bookmarked.contains(&id)
    }

    pub fn contains(&self, kind: EngagementKind, id: PostId) -> bool {
        match kind {
            EngagementKind::Like => self.has_liked(id),
            EngagementKind::Bookmark => self.has_bookmarked(id),
        }
    }
}

#[derive(Debug, Clone)]
struct SessionState {
    identity: Option<Identity>,
    engagement: Engagement,
    last_seen: Instant,
}

impl SessionState {
    fn new(identity: Option<Identity>) -> Self {
        Self {
            identity,
            engagement: Engagement::default(),
            last_seen: Instant::now(),
        }
    }
}

/// Result of resolving a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSession {
    pub token: Uuid,
    pub identity: Option<Identity>,
    pub engagement: Engagement,
}

impl CurrentSession {
    pub fn has_role(&self, role: Role) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|identity| identity.role == role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    Like,
    Bookmark,
}

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct SessionService {
    sessions: Arc<DashMap<Uuid, SessionState>>,
    idle_timeout: Duration,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            idle_timeout,
        }
    }

    /// Open a reader session with no identity attached.
    pub fn open_anonymous(&self) -> Uuid {
        self.open(None)
    }

    fn open(&self, identity: Option<Identity>) -> Uuid {
        self.sweep_idle();
        let token = Uuid::new_v4();
        self.sessions.insert(token, SessionState::new(identity));
        token
    }

    fn is_idle(&self, state: &SessionState) -> bool {
        state.last_seen.elapsed() >= self.idle_timeout
    }

    /// Drop every session idle past the timeout. Runs whenever one is opened.
    fn sweep_idle(&self) {
        let before = self.sessions.len();
        self.sessions.retain(|_, state| !self.is_idle(state));
        let dropped = before.saturating_sub(self.sessions.len());
        if dropped > 0 {
            debug!(target = "inkpost::session", dropped, "idle sessions dropped");
        }
    }

    pub fn login(&self, name: &str, role: Role) -> Result<(Uuid, Identity), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingName);
        }

        let identity = Identity {
            name: name.to_string(),
            role,
        };
        let token = self.open(Some(identity.clone()));

        info!(
            target = "inkpost::session",
            role = role.as_str(),
            name = %identity.name,
            "session opened"
        );
        Ok((token, identity))
    }

    /// Drop the session. Returns whether it existed.
    pub fn logout(&self, token: Uuid) -> bool {
        self.sessions.remove(&token).is_some()
    }

    pub fn resolve(&self, token: Uuid) -> Result<CurrentSession, SessionError> {
        self.with_live(token, |state| CurrentSession {
            token,
            identity: state.identity.clone(),
            engagement: state.engagement.clone(),
        })
    }

    /// Flip membership of `id` in the chosen set; returns the updated sets.
    pub fn toggle(
        &self,
        token: Uuid,
        kind: EngagementKind,
        id: PostId,
    ) -> Result<Engagement, SessionError> {
        self.with_live(token, |state| {
            let set = match kind {
                EngagementKind::Like => &mut state.engagement.liked,
                EngagementKind::Bookmark => &mut state.engagement.bookmarked,
            };
            if !set.remove(&id) {
                set.insert(id);
            }
            state.engagement.clone()
        })
    }

    /// Run `f` on a live session, refreshing its idle clock. Expired entries
    /// are removed and reported as unknown.
    fn with_live<T>(
        &self,
        token: Uuid,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> Result<T, SessionError> {
        {
            let mut state = self.sessions.get_mut(&token).ok_or(SessionError::Unknown)?;
            if !self.is_idle(&state) {
                state.last_seen = Instant::now();
                return Ok(f(&mut *state));
            }
        }

        self.sessions.remove(&token);
        Err(SessionError::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_trims_and_requires_name() {
        let sessions = SessionService::new();
        assert_eq!(
            sessions.login("   ", Role::Author).err(),
            Some(SessionError::MissingName)
        );

        let (token, identity) = sessions.login("  Jane Smith ", Role::Author).expect("login");
        assert_eq!(identity.name, "Jane Smith");

        let current = sessions.resolve(token).expect("resolve");
        assert!(current.has_role(Role::Author));
        assert!(!current.has_role(Role::Admin));
    }

    #[test]
    fn anonymous_session_has_no_role() {
        let sessions = SessionService::new();
        let token = sessions.open_anonymous();
        let current = sessions.resolve(token).expect("resolve");
        assert_eq!(current.identity, None);
        assert!(!current.has_role(Role::Author));
    }

    #[test]
    fn toggle_flips_membership() {
        let sessions = SessionService::new();
        let token = sessions.open_anonymous();

        let liked = sessions
            .toggle(token, EngagementKind::Like, 3)
            .expect("like");
        assert!(liked.has_liked(3));

        let bookmarked = sessions
            .toggle(token, EngagementKind::Bookmark, 3)
            .expect("bookmark");
        assert!(bookmarked.has_bookmarked(3));
        assert!(bookmarked.has_liked(3), "like survives a bookmark toggle");

        let unliked = sessions
            .toggle(token, EngagementKind::Like, 3)
            .expect("unlike");
        assert!(!unliked.contains(EngagementKind::Like, 3));
        assert!(unliked.contains(EngagementKind::Bookmark, 3));

        assert_eq!(sessions.resolve(token).expect("resolve").engagement, unliked);
    }

    #[test]
    fn toggle_reports_changes_made_through_another_handle() {
        let sessions = SessionService::new();
        let token = sessions.open_anonymous();
        let stale = sessions.resolve(token).expect("resolve");

        sessions
            .clone()
            .toggle(token, EngagementKind::Like, 4)
            .expect("like elsewhere");
        let engagement = sessions
            .toggle(token, EngagementKind::Bookmark, 4)
            .expect("bookmark");

        assert!(!stale.engagement.has_liked(4));
        assert!(engagement.has_liked(4));
    }

    #[test]
    fn idle_sessions_expire_and_are_swept() {
        let sessions = SessionService::with_idle_timeout(Duration::ZERO);
        let first = sessions.open_anonymous();
        let second = sessions.open_anonymous();

        assert_eq!(sessions.sessions.len(), 1, "opening swept the idle session");
        assert!(!sessions.sessions.contains_key(&first));
        assert_eq!(sessions.resolve(second).err(), Some(SessionError::Unknown));
        assert!(sessions.sessions.is_empty());
        assert_eq!(
            sessions.toggle(second, EngagementKind::Like, 1),
            Err(SessionError::Unknown)
        );
    }

    #[test]
    fn activity_keeps_sessions_alive() {
        let sessions = SessionService::with_idle_timeout(Duration::from_secs(60));
        let token = sessions.open_anonymous();
        sessions.open_anonymous();

        assert!(sessions.resolve(token).is_ok());
        assert_eq!(sessions.sessions.len(), 2);
    }

    #[test]
    fn logout_forgets_session_and_engagement() {
        let sessions = SessionService::new();
        let token = sessions.open_anonymous();
        sessions
            .toggle(token, EngagementKind::Like, 1)
            .expect("toggle");

        assert!(sessions.logout(token));
        assert!(!sessions.logout(token));
        assert_eq!(sessions.resolve(token).err(), Some(SessionError::Unknown));
        assert_eq!(
            sessions.toggle(token, EngagementKind::Like, 1),
            Err(SessionError::Unknown)
        );
    }
}
