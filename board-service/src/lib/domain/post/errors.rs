use thiserror::Error;

/// Error for post field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostFieldError {
    #[error("Post {0} must not be empty")]
    Empty(&'static str),

    #[error("Post {field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post: {0}")]
    InvalidField(#[from] PostFieldError),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl PostError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PostError::InvalidField(_) => "InvalidInput",
            PostError::NotFound(_) => "PostNotFound",
            PostError::DatabaseError(_) => "StorageError",
        }
    }
}
