//! Request and response types for the auth endpoints. Tokens are wrapped in
//! `SessionToken` so they never show up in `Debug` output or logs.

use crate::auth::role::Role;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response of `POST /auth/telegram`.
#[derive(Deserialize)]
pub struct TokenInfo {
    pub access_token: String,
    pub token_type: String,
}

impl fmt::Debug for TokenInfo {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenInfo")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Profile returned by `GET /auth/me`. Always replaced wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub fullname: String,
    pub role: Role,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Bearer credential issued by the backend.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Exposes the raw token for the `Authorization` header or the cookie jar.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SessionToken([REDACTED])")
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_debug_is_redacted() {
        let token = SessionToken::new("eyJhbGciOiJIUzI1NiJ9.payload.sig");
        let debug = format!("{token:?}");
        assert!(!debug.contains("payload"));
        assert_eq!(token.expose(), "eyJhbGciOiJIUzI1NiJ9.payload.sig");
    }

    #[test]
    fn token_info_debug_is_redacted() {
        let info: TokenInfo =
            serde_json::from_str(r#"{"access_token":"secret-value","token_type":"bearer"}"#)
                .expect("token info should parse");
        let debug = format!("{info:?}");
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("bearer"));
    }

    #[test]
    fn user_profile_optional_fields_default_to_none() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"user_id":42,"fullname":"A","role":1}"#)
                .expect("profile should parse");
        assert_eq!(profile.user_id, 42);
        assert_eq!(profile.role, Role::Specialist);
        assert_eq!(profile.username, None);
        assert_eq!(profile.division, None);
        assert_eq!(profile.position, None);
    }
}
