use std::fmt;

use auth::Credential;
use auth::HashRecord;
use auth::Identity;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::PasswordInputError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Created once at registration and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub password_hash: HashRecord,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, password_hash: HashRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            password_hash,
            created_at,
        }
    }
}

/// User identifier chosen at registration.
///
/// Ensures the identifier is 3-32 characters and contains only alphanumeric,
/// underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid user identifier.
    ///
    /// Validates length and character constraints.
    ///
    /// # Arguments
    /// * `user_id` - Raw identifier string
    ///
    /// # Returns
    /// Validated UserId value object
    ///
    /// # Errors
    /// * `TooShort` - Identifier shorter than 3 characters
    /// * `TooLong` - Identifier longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(user_id: String) -> Result<Self, UserIdError> {
        let user_id = Self::with_valid_length(user_id)?;
        let user_id = Self::with_valid_chars(user_id)?;
        Ok(Self(user_id))
    }

    fn with_valid_length(user_id: String) -> Result<String, UserIdError> {
        let length = user_id.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UserIdError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UserIdError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(user_id)
        }
    }

    fn with_valid_chars(user_id: String) -> Result<String, UserIdError> {
        if user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Ok(user_id)
        } else {
            Err(UserIdError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as submitted by a client.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MAX_LENGTH: usize = 1024;

    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password longer than 1024 bytes
    pub fn new(password: String) -> Result<Self, PasswordInputError> {
        if password.is_empty() {
            Err(PasswordInputError::Empty)
        } else if password.len() > Self::MAX_LENGTH {
            Err(PasswordInputError::TooLong {
                max: Self::MAX_LENGTH,
                actual: password.len(),
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Domain command for registering a user
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub user_id: UserId,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(user_id: UserId, password: Password) -> Self {
        Self { user_id, password }
    }
}

/// Domain command for logging a user in
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub user_id: UserId,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(user_id: UserId, password: Password) -> Self {
        Self { user_id, password }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub credential: Credential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_id() {
        let user_id = UserId::new("alice".to_string()).unwrap();
        assert_eq!(user_id.as_str(), "alice");
        assert!(UserId::new("user_name-01".to_string()).is_ok());
    }

    #[test]
    fn test_user_id_too_short() {
        assert_eq!(
            UserId::new("al".to_string()),
            Err(UserIdError::TooShort { min: 3, actual: 2 })
        );
    }

    #[test]
    fn test_user_id_too_long() {
        assert_eq!(
            UserId::new("a".repeat(33)),
            Err(UserIdError::TooLong {
                max: 32,
                actual: 33
            })
        );
    }

    #[test]
    fn test_user_id_invalid_characters() {
        assert_eq!(
            UserId::new("alice smith".to_string()),
            Err(UserIdError::InvalidCharacters)
        );
        assert_eq!(
            UserId::new("al'; --".to_string()),
            Err(UserIdError::InvalidCharacters)
        );
    }

    #[test]
    fn test_password_validation() {
        assert!(Password::new("hunter2".to_string()).is_ok());
        assert_eq!(
            Password::new(String::new()),
            Err(PasswordInputError::Empty)
        );
        assert!(matches!(
            Password::new("x".repeat(1025)),
            Err(PasswordInputError::TooLong { .. })
        ));
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter2".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter2"));
    }
}
