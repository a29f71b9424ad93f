//! Authentication core library
//!
//! Provides reusable authentication infrastructure for the board service:
//! - Password hashing (Argon2id)
//! - Stateless signed tokens (HS256 JWS with expiry)
//! - Stateful cookie sessions over a pluggable session store
//! - A single [`AuthStrategy`] facade so handlers never care which is active
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let record = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &record));
//! ```
//!
//! ## Signed Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Utc;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let token = issuer.issue("alice", Utc::now()).unwrap();
//! let identity = issuer.verify(&token, Utc::now()).unwrap();
//! assert_eq!(identity.user_id(), "alice");
//! ```
//!
//! ## Strategy Facade
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AuthStrategy, Authenticator, InMemorySessionStore, SessionManager};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = Arc::new(InMemorySessionStore::new());
//! let auth = Authenticator::session(SessionManager::new(store), "session");
//!
//! let credential = auth.issue_credential("alice").await.unwrap();
//! let identity = auth.authenticate(credential.as_str()).await.unwrap();
//! assert_eq!(identity.user_id(), "alice");
//!
//! auth.revoke(credential.as_str()).await.unwrap();
//! assert!(auth.authenticate(credential.as_str()).await.is_err());
//! # });
//! ```

pub mod authenticator;
pub mod identity;
pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthStrategy;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::Credential;
pub use authenticator::CredentialTransport;
pub use authenticator::DEFAULT_SESSION_COOKIE;
pub use identity::Identity;
pub use password::HashCost;
pub use password::HashRecord;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::InMemorySessionStore;
pub use session::Session;
pub use session::SessionError;
pub use session::SessionId;
pub use session::SessionManager;
pub use session::SessionStore;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::DEFAULT_TOKEN_TTL_HOURS;
