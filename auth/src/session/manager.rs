use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::errors::SessionError;
use super::store::Session;
use super::store::SessionId;
use super::store::SessionStore;
use crate::identity::Identity;

/// Stateful session strategy backed by a [`SessionStore`].
///
/// A session is valid exactly as long as its record exists, which makes
/// logout immediate. Without a max age sessions live until destroyed.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    max_age: Option<Duration>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            max_age: None,
        }
    }

    /// Treat sessions older than `max_age` as absent.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Create a session for `user_id` and return its id for the cookie.
    ///
    /// # Errors
    /// * `Storage` - Session could not be stored
    pub async fn create(&self, user_id: &str, now: DateTime<Utc>) -> Result<SessionId, SessionError> {
        let session = Session {
            id: SessionId::generate(),
            user_id: user_id.to_string(),
            created_at: now,
        };
        let id = session.id.clone();

        self.store.put(session).await?;
        tracing::debug!(user_id = %user_id, "Session created");

        Ok(id)
    }

    /// Resolve presented session id material to the identity it maps to.
    ///
    /// # Errors
    /// * `NotFound` - No live session has this id
    /// * `Storage` - Storage lookup failed
    pub async fn resolve(&self, raw_id: &str, now: DateTime<Utc>) -> Result<Identity, SessionError> {
        let id = SessionId::parse(raw_id).ok_or(SessionError::NotFound)?;
        let session = self.store.get(&id).await?.ok_or(SessionError::NotFound)?;

        if let Some(max_age) = self.max_age {
            // An expiry past the representable range counts as elapsed.
            let outlived = match session.created_at.checked_add_signed(max_age) {
                Some(expires_at) => now >= expires_at,
                None => true,
            };
            if outlived {
                tracing::debug!(user_id = %session.user_id, "Session outlived max age");
                self.store.delete(&id).await?;
                return Err(SessionError::NotFound);
            }
        }

        Ok(Identity::new(session.user_id))
    }

    /// Destroy a session. Unknown or malformed ids are a no-op.
    ///
    /// # Errors
    /// * `Storage` - Storage deletion failed
    pub async fn destroy(&self, raw_id: &str) -> Result<(), SessionError> {
        match SessionId::parse(raw_id) {
            Some(id) => self.store.delete(&id).await,
            None => Ok(()),
        }
    }
}
