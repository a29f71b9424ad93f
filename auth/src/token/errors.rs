use thiserror::Error;

/// Error type for signed token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}

impl TokenError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::EncodingFailed(_) => "EncodingFailed",
            TokenError::Malformed => "Malformed",
            TokenError::BadSignature => "BadSignature",
            TokenError::Expired => "Expired",
        }
    }
}
