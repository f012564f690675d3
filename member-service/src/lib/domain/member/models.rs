use std::fmt;

use auth::Credential;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::member::errors::MemberIdError;
use crate::member::errors::UsernameError;
use crate::member::photos::PhotoGallery;

/// Member aggregate entity.
///
/// Represents a registered account together with its photo gallery. The
/// credential fields are always set as a pair: `password_hash` is the keyed
/// hash of the password under `password_salt`, and neither is ever written
/// without the other.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub username: Username,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub photos: PhotoGallery,
    pub created_at: DateTime<Utc>,
    /// Optimistic-concurrency token. Bumped by every save; a save whose
    /// version no longer matches the stored row fails with `Conflict`.
    pub version: i64,
}

impl Member {
    /// Construct a freshly registered member with an empty gallery.
    ///
    /// # Arguments
    /// * `username` - Validated, normalized username
    /// * `credential` - Derived hash/salt pair for the chosen password
    ///
    /// # Returns
    /// Member with a new random ID and version 0
    pub fn new(username: Username, credential: Credential) -> Self {
        Self {
            id: MemberId::new(),
            username,
            password_hash: credential.hash,
            password_salt: credential.salt,
            photos: PhotoGallery::new(),
            created_at: Utc::now(),
            version: 0,
        }
    }
}

/// Member unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(pub Uuid);

impl MemberId {
    /// Generate a new random member ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a member ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, MemberIdError> {
        Uuid::parse_str(s)
            .map(MemberId)
            .map_err(|e| MemberIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Usernames are unique per deployment and compared case-insensitively, so
/// the raw input is normalized to lower-case before validation and kept that
/// way in storage. Ensures 3-32 characters, alphanumeric plus underscore and
/// hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// Trims, lower-cases, then validates length and character constraints.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Returns
    /// Validated, normalized Username value object
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = username.trim().to_lowercase();
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authenticated caller identity, extracted from a verified session token by
/// the inbound auth middleware and passed explicitly into every operation
/// that acts on the caller's own account.
#[derive(Debug, Clone)]
pub struct IdentityContext {
    pub member_id: MemberId,
    pub username: Username,
}

/// Command to register a new member with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plain text password (hashed by the service)
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

/// Command to authenticate an existing member
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

/// File contents received for a photo upload
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Result of a successful registration or login: the normalized username, a
/// signed session token, and the main photo URL when one is selected.
#[derive(Debug, Clone)]
pub struct AuthenticatedMember {
    pub username: String,
    pub token: String,
    pub main_photo_url: Option<String>,
}
