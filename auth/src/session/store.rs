use std::fmt;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::distributions::DistString;
use rand::rngs::OsRng;

use super::errors::SessionError;

/// Opaque, unguessable session identifier.
///
/// 43 alphanumeric characters drawn from the OS CSPRNG (~256 bits).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub const LENGTH: usize = 43;

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Alphanumeric.sample_string(&mut OsRng, Self::LENGTH))
    }

    /// Parse identifier material presented by a client.
    ///
    /// Returns `None` for anything that could not have been generated by
    /// [`SessionId::generate`], so storage is never queried with junk.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == Self::LENGTH && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Session ids are bearer secrets; keep them out of logs.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({}…)", &self.0[..4.min(self.0.len())])
    }
}

/// Server side session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Session storage boundary.
///
/// Every operation is a single atomic storage call; callers never hold a lock
/// across two of them.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Store a session under its id, replacing any previous record.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn put(&self, session: Session) -> Result<(), SessionError>;

    /// Retrieve a session by id.
    ///
    /// # Returns
    /// Optional session (None if absent)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionError>;

    /// Remove a session. Removing an absent id succeeds.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn delete(&self, id: &SessionId) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_parseable_and_unique() {
        let first = SessionId::generate();
        let second = SessionId::generate();

        assert_eq!(first.as_str().len(), SessionId::LENGTH);
        assert_eq!(SessionId::parse(first.as_str()), Some(first.clone()));
        assert_ne!(first, second);
    }

    #[test]
    fn test_parse_rejects_foreign_material() {
        assert_eq!(SessionId::parse(""), None);
        assert_eq!(SessionId::parse("short"), None);
        assert_eq!(SessionId::parse(&"a".repeat(SessionId::LENGTH + 1)), None);
        assert_eq!(SessionId::parse(&"-".repeat(SessionId::LENGTH)), None);
    }

    #[test]
    fn test_debug_is_truncated() {
        let id = SessionId::generate();
        assert!(!format!("{:?}", id).contains(id.as_str()));
    }
}
