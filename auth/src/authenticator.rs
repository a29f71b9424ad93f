use async_trait::async_trait;
use chrono::Utc;

use crate::identity::Identity;
use crate::session::SessionError;
use crate::session::SessionManager;
use crate::token::TokenError;
use crate::token::TokenIssuer;

/// Name of the cookie carrying the session id unless configured otherwise.
pub const DEFAULT_SESSION_COOKIE: &str = "session";

/// Credential material handed to a client after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Signed token, returned in the response body and presented as `Authorization: Bearer`
    BearerToken(String),
    /// Opaque session id, set as a cookie
    SessionId(String),
}

impl Credential {
    pub fn as_str(&self) -> &str {
        match self {
            Credential::BearerToken(token) => token,
            Credential::SessionId(id) => id,
        }
    }
}

/// Where a strategy expects the client to present its credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialTransport<'a> {
    /// `Authorization: Bearer <token>`
    BearerHeader,
    /// Cookie with the given name
    Cookie(&'a str),
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl AuthenticationError {
    /// Stable machine-readable kind of the underlying failure.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthenticationError::Token(e) => e.kind(),
            AuthenticationError::Session(e) => e.kind(),
        }
    }

    /// Whether the caller failed to prove who they are, as opposed to the
    /// service failing to check.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthenticationError::Token(
                TokenError::Malformed | TokenError::BadSignature | TokenError::Expired
            ) | AuthenticationError::Session(SessionError::NotFound)
        )
    }
}

/// Capability set every authentication strategy provides.
///
/// Route handlers depend on this trait only; which strategy backs it is fixed
/// at startup.
#[async_trait]
pub trait AuthStrategy: Send + Sync + 'static {
    /// Where clients present credentials issued by this strategy.
    fn transport(&self) -> CredentialTransport<'_>;

    /// Issue credential material for a user who has just proven their identity.
    ///
    /// # Errors
    /// * `Token(EncodingFailed)` - Token could not be signed
    /// * `Session(Storage)` - Session could not be stored
    async fn issue_credential(&self, user_id: &str) -> Result<Credential, AuthenticationError>;

    /// Authenticate presented credential material.
    ///
    /// # Errors
    /// * `Token(Malformed | BadSignature | Expired)` - Token rejected
    /// * `Session(NotFound)` - No live session for this id
    /// * `Session(Storage)` - Session lookup failed
    async fn authenticate(&self, presented: &str) -> Result<Identity, AuthenticationError>;

    /// Revoke presented credential material.
    ///
    /// # Errors
    /// * `Session(Storage)` - Session deletion failed
    async fn revoke(&self, presented: &str) -> Result<(), AuthenticationError>;
}

/// The configured authentication strategy.
///
/// Exactly one variant is active per running instance.
pub enum Authenticator {
    /// Stateless signed tokens. Revocation is a no-op: a token stays valid
    /// until it expires.
    Token(TokenIssuer),

    /// Server side sessions referenced by a cookie.
    Session {
        manager: SessionManager,
        cookie_name: String,
    },
}

impl Authenticator {
    pub fn token(issuer: TokenIssuer) -> Self {
        Authenticator::Token(issuer)
    }

    pub fn session(manager: SessionManager, cookie_name: impl Into<String>) -> Self {
        Authenticator::Session {
            manager,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        match self {
            Authenticator::Token(_) => "token",
            Authenticator::Session { .. } => "session",
        }
    }
}

#[async_trait]
impl AuthStrategy for Authenticator {
    fn transport(&self) -> CredentialTransport<'_> {
        match self {
            Authenticator::Token(_) => CredentialTransport::BearerHeader,
            Authenticator::Session { cookie_name, .. } => CredentialTransport::Cookie(cookie_name),
        }
    }

    async fn issue_credential(&self, user_id: &str) -> Result<Credential, AuthenticationError> {
        let now = Utc::now();

        match self {
            Authenticator::Token(issuer) => {
                Ok(Credential::BearerToken(issuer.issue(user_id, now)?))
            }
            Authenticator::Session { manager, .. } => {
                let id = manager.create(user_id, now).await?;
                Ok(Credential::SessionId(id.as_str().to_string()))
            }
        }
    }

    async fn authenticate(&self, presented: &str) -> Result<Identity, AuthenticationError> {
        let now = Utc::now();

        let result: Result<Identity, AuthenticationError> = match self {
            Authenticator::Token(issuer) => issuer.verify(presented, now).map_err(Into::into),
            Authenticator::Session { manager, .. } => {
                manager.resolve(presented, now).await.map_err(Into::into)
            }
        };

        if let Err(e) = &result {
            tracing::debug!(
                strategy = self.strategy_name(),
                kind = e.kind(),
                "Credential rejected"
            );
        }

        result
    }

    async fn revoke(&self, presented: &str) -> Result<(), AuthenticationError> {
        match self {
            Authenticator::Token(_) => {
                tracing::debug!("Signed tokens cannot be revoked before expiry");
                Ok(())
            }
            Authenticator::Session { manager, .. } => Ok(manager.destroy(presented).await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::InMemorySessionStore;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn token_authenticator() -> Authenticator {
        Authenticator::token(TokenIssuer::new(SECRET))
    }

    fn session_authenticator() -> Authenticator {
        let store = Arc::new(InMemorySessionStore::new());
        Authenticator::session(SessionManager::new(store), DEFAULT_SESSION_COOKIE)
    }

    #[tokio::test]
    async fn test_token_issue_and_authenticate() {
        let authenticator = token_authenticator();

        let credential = authenticator
            .issue_credential("alice")
            .await
            .expect("Failed to issue credential");
        assert!(matches!(credential, Credential::BearerToken(_)));

        let identity = authenticator
            .authenticate(credential.as_str())
            .await
            .expect("Failed to authenticate");
        assert_eq!(identity.user_id(), "alice");
        assert_eq!(authenticator.transport(), CredentialTransport::BearerHeader);
    }

    #[tokio::test]
    async fn test_token_revoke_is_a_noop() {
        let authenticator = token_authenticator();
        let credential = authenticator.issue_credential("alice").await.unwrap();

        authenticator
            .revoke(credential.as_str())
            .await
            .expect("Revoke must succeed");

        // Still valid: stateless tokens outlive logout.
        assert!(authenticator.authenticate(credential.as_str()).await.is_ok());
    }

    #[tokio::test]
    async fn test_token_rejections() {
        let authenticator = token_authenticator();

        let err = authenticator.authenticate("garbage").await.unwrap_err();
        assert_eq!(err, AuthenticationError::Token(TokenError::Malformed));
        assert_eq!(err.kind(), "Malformed");
        assert!(err.is_rejection());

        let other = Authenticator::token(TokenIssuer::new(b"another_secret_at_least_32_bytes!!"));
        let credential = other.issue_credential("alice").await.unwrap();
        let err = authenticator
            .authenticate(credential.as_str())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "BadSignature");
    }

    #[tokio::test]
    async fn test_session_issue_authenticate_revoke() {
        let authenticator = session_authenticator();

        let credential = authenticator.issue_credential("alice").await.unwrap();
        assert!(matches!(credential, Credential::SessionId(_)));
        assert_eq!(
            authenticator.transport(),
            CredentialTransport::Cookie("session")
        );

        let identity = authenticator.authenticate(credential.as_str()).await.unwrap();
        assert_eq!(identity.user_id(), "alice");

        authenticator.revoke(credential.as_str()).await.unwrap();

        let err = authenticator
            .authenticate(credential.as_str())
            .await
            .unwrap_err();
        assert_eq!(err, AuthenticationError::Session(SessionError::NotFound));
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn test_session_revoke_is_idempotent() {
        let authenticator = session_authenticator();
        let credential = authenticator.issue_credential("alice").await.unwrap();

        authenticator.revoke(credential.as_str()).await.unwrap();
        authenticator.revoke(credential.as_str()).await.unwrap();
        authenticator.revoke("never-issued").await.unwrap();
    }

    #[test]
    fn test_storage_failure_is_not_a_rejection() {
        let err = AuthenticationError::Session(SessionError::Storage("down".to_string()));
        assert!(!err.is_rejection());
        assert_eq!(err.kind(), "StorageError");
    }
}
