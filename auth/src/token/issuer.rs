use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Minimum signing secret length in bytes.
///
/// HS512 keys shorter than the hash output width weaken the signature.
pub const MIN_SECRET_LENGTH: usize = 64;

/// Session token issuer.
///
/// Produces opaque signed tokens from claims, and validates inbound tokens
/// for the authorization middleware. Uses HS512 (HMAC with SHA-512).
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new token issuer with a signing secret.
    ///
    /// The secret is checked once here, so a misconfigured deployment fails
    /// at startup rather than on the first login.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// TokenIssuer instance configured with the HS512 algorithm
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    /// * `WeakSecret` - Secret is shorter than 64 bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
        })
    }

    /// Sign claims into a session token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Decode and validate a session token.
    ///
    /// # Arguments
    /// * `token` - Token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `TokenExpired` - Token expiry has passed
    /// * `DecodingFailed` - Token signature is invalid or malformed
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
