use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by a session token.
///
/// `sub` identifies the user, `name` and `role` describe the principal for
/// guards and greetings, and `jti` uniquely identifies this session so logout
/// can revoke it before `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject: user identifier
    pub sub: String,

    /// Display name of the user
    pub name: String,

    /// Role tag ("user", "moderator", "admin")
    pub role: String,

    /// Unique session identifier, target of revocation on logout
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for a freshly authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `name` - Display name
    /// * `role` - Role tag
    /// * `expiration_hours` - Hours until the session expires
    pub fn new(
        user_id: impl ToString,
        name: impl Into<String>,
        role: impl Into<String>,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            name: name.into(),
            role: role.into(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the session is past its expiration.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
