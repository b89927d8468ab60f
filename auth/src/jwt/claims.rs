use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Carries the identity the access-control layer needs on every request
/// (`sub`, `email`, `role`) so no account lookup happens per request.
/// The role is a plain string here; the service decides what it means.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email at the time of login
    pub email: String,

    /// Account role at the time of login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an account with automatic expiration.
    ///
    /// # Arguments
    /// * `account_id` - Unique account identifier
    /// * `email` - Account email
    /// * `role` - Account role, if any
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with sub, email, role, iat and exp set
    pub fn for_account(
        account_id: impl ToString,
        email: impl Into<String>,
        role: Option<String>,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: account_id.to_string(),
            email: email.into(),
            role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Override the validity window (Unix timestamps).
    pub fn with_window(mut self, iat: i64, exp: i64) -> Self {
        self.iat = iat;
        self.exp = exp;
        self
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
