use thiserror::Error;

/// Error for MemberId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MemberIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for PhotoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhotoIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for photo gallery operations that would break the single-main
/// invariant or target a missing photo
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhotoError {
    #[error("Photo not found: {0}")]
    NotFound(String),

    #[error("Photo is already the main photo: {0}")]
    AlreadyMain(String),

    #[error("Cannot delete the main photo: {0}")]
    CannotDeleteMain(String),
}

/// Error for photo blob storage operations
#[derive(Debug, Clone, Error)]
pub enum PhotoStoreError {
    #[error("Photo upload failed: {0}")]
    Upload(String),

    #[error("Photo deletion failed: {0}")]
    Delete(String),
}

/// Top-level error for all member-related operations
#[derive(Debug, Clone, Error)]
pub enum MemberError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid member ID: {0}")]
    InvalidMemberId(#[from] MemberIdError),

    #[error("Invalid photo ID: {0}")]
    InvalidPhotoId(#[from] PhotoIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    // Domain-level errors
    #[error("Username is taken: {0}")]
    UsernameTaken(String),

    #[error("No member with username: {0}")]
    UnknownUsername(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Member not found: {0}")]
    NotFound(String),

    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Token error: {0}")]
    Token(String),

    // Infrastructure errors
    #[error("Photo storage error: {0}")]
    Storage(#[from] PhotoStoreError),

    #[error("Member record changed concurrently: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for MemberError {
    fn from(err: anyhow::Error) -> Self {
        MemberError::Database(err.to_string())
    }
}
