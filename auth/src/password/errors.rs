use thiserror::Error;

/// Error type for password operations.
///
/// A password mismatch is never an error: verification reports it as `false`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),
}
