use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Carries the authenticated identity (stable id plus username) and the
/// validity window. Identical inputs produce identical claims apart from the
/// `iat`/`exp` timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: stable member identifier
    pub sub: String,

    /// Username at issuance time
    pub unique_name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated member with automatic expiration.
    ///
    /// # Arguments
    /// * `member_id` - Stable member identifier
    /// * `username` - Username at issuance time
    /// * `expiration_days` - Days until the token expires
    ///
    /// # Returns
    /// Claims with sub, unique_name, iat, and exp set
    pub fn for_member(member_id: impl ToString, username: String, expiration_days: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::days(expiration_days);

        Self {
            sub: member_id.to_string(),
            unique_name: username,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_member() {
        let claims = Claims::for_member("member123", "alice".to_string(), 7);

        assert_eq!(claims.sub, "member123");
        assert_eq!(claims.unique_name, "alice");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60); // 7 days
    }
}
