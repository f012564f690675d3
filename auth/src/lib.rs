//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Salted credential hashing (HMAC-SHA512 keyed hash)
//! - Session token generation and validation (JWT, HS512)
//! - Authentication coordination
//!
//! Each service defines its own authentication traits and adapts these implementations.
//! This avoids coupling services through shared domain logic while reducing code duplication.
//!
//! # Examples
//!
//! ## Credential Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let credential = hasher.create("my_password").unwrap();
//! let is_valid = hasher
//!     .verify("my_password", &credential.hash, &credential.salt)
//!     .unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, TokenIssuer};
//!
//! let secret = b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
//! let issuer = TokenIssuer::new(secret).unwrap();
//! let claims = Claims::for_member("member123", "alice".to_string(), 7);
//! let token = issuer.issue(&claims).unwrap();
//! let decoded: Claims = issuer.decode(&token).unwrap();
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let secret = b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
//! let auth = Authenticator::new(secret).unwrap();
//!
//! // Register: derive a salted credential
//! let credential = auth.create_credential("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_member("member123", "alice".to_string(), 7);
//! let result = auth
//!     .authenticate("password123", &credential.hash, &credential.salt, &claims)
//!     .unwrap();
//! println!("Token: {}", result.access_token);
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! ```

pub mod authenticator;
pub mod credential;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use credential::Credential;
pub use credential::CredentialError;
pub use credential::CredentialHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
