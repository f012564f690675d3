use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("Token signing secret too weak: minimum {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,
}
