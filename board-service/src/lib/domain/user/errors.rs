use auth::AuthenticationError;
use thiserror::Error;

/// Error for UserId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User id too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("User id too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "User id contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for submitted password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordInputError),

    // Domain-level errors
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Password does not match")]
    BadPassword,

    #[error("Credential error: {0}")]
    Credential(#[from] AuthenticationError),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl UserError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            UserError::InvalidUserId(_) | UserError::InvalidPassword(_) => "InvalidInput",
            UserError::DuplicateUser(_) => "DuplicateUser",
            UserError::UserNotFound(_) => "UserNotFound",
            UserError::BadPassword => "BadPassword",
            UserError::Credential(e) => e.kind(),
            UserError::HashingFailure(_) => "HashingFailure",
            UserError::DatabaseError(_) => "StorageError",
        }
    }

    /// Whether the caller failed to prove who they are.
    ///
    /// Every such failure is reported to clients identically.
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            UserError::UserNotFound(_) | UserError::BadPassword => true,
            UserError::Credential(e) => e.is_rejection(),
            _ => false,
        }
    }
}
