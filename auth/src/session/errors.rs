use thiserror::Error;

/// Error type for session operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl SessionError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::NotFound => "NotFound",
            SessionError::Storage(_) => "StorageError",
        }
    }
}
