use thiserror::Error;

/// Error type for credential operations.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Invalid credential input: {0}")]
    InvalidInput(String),

    #[error("Salt generation failed: {0}")]
    SaltGeneration(String),
}
