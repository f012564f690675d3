use serde::Serialize;

use crate::credential::Credential;
use crate::credential::CredentialError;
use crate::credential::CredentialHasher;
use crate::token::TokenError;
use crate::token::TokenIssuer;

/// Authentication coordinator combining credential verification and session
/// token issuance.
///
/// Provides high-level authentication operations by coordinating the
/// credential hasher and the token issuer.
pub struct Authenticator {
    credential_hasher: CredentialHasher,
    token_issuer: TokenIssuer,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for session token signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `MissingSecret` / `WeakSecret` - Signing secret is absent or too short
    pub fn new(token_secret: &[u8]) -> Result<Self, TokenError> {
        Ok(Self {
            credential_hasher: CredentialHasher::new(),
            token_issuer: TokenIssuer::new(token_secret)?,
        })
    }

    /// Derive a salted credential for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Credential holding the derived hash and salt
    ///
    /// # Errors
    /// * `CredentialError` - Derivation failed
    pub fn create_credential(&self, password: &str) -> Result<Credential, CredentialError> {
        self.credential_hasher.create(password)
    }

    /// Verify a credential and generate a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored credential hash
    /// * `salt` - Stored credential salt
    /// * `claims` - Claims to encode in the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `CredentialError` - Credential verification failed
    /// * `TokenError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        hash: &[u8],
        salt: &[u8],
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        // Verify credential
        let is_valid = self.credential_hasher.verify(password, hash, salt)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        // Generate session token
        let access_token = self.token_issuer.issue(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate a session token without credential verification.
    ///
    /// Used at registration, where the credential was just created and there
    /// is nothing stored to verify against yet.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        self.token_issuer.issue(claims)
    }

    /// Validate and decode a session token.
    ///
    /// # Arguments
    /// * `token` - Token string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `TokenError` - Token validation or decoding failed
    pub fn validate_token<T: for<'de> serde::Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<T, TokenError> {
        self.token_issuer.decode(token)
    }
}
