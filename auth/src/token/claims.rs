use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::Identity;

/// Signed token payload.
///
/// Readable by anyone holding the token; only the signature makes it
/// trustworthy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the authenticated user
    pub user_id: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for a user expiring `ttl` after `issued_at`.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    pub fn for_user(
        user_id: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expiration = issued_at.checked_add_signed(ttl)?;

        Some(Self {
            user_id: user_id.to_string(),
            exp: expiration.timestamp(),
            iat: Some(issued_at.timestamp()),
        })
    }

    /// A token is expired once `now` reaches its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id.clone())
    }
}
