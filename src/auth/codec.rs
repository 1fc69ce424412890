//! Reads the `exp` claim of an issued token to size the cookie lifetime.
//!
//! The claim is decoded without any signature check. It is a UX hint only: it
//! decides how long the console remembers a token, never whether the token is
//! valid. Validity is decided by the backend on every `/auth/me` call.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Persistence duration used when the token carries no readable expiry.
pub const FALLBACK_DAYS: u64 = 1;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("missing exp claim")]
    MissingExp,
}

/// Days until the token expires, rounded up, relative to the current time.
/// Never fails; unreadable tokens yield [`FALLBACK_DAYS`].
#[must_use]
pub fn decode_expiry(token: &str) -> u64 {
    decode_expiry_at(token, Utc::now().timestamp())
}

/// Same as [`decode_expiry`] with an explicit current time (unix seconds).
#[must_use]
pub fn decode_expiry_at(token: &str, now_unix_seconds: i64) -> u64 {
    match expiry_claim(token) {
        Ok(exp) => days_until(exp, now_unix_seconds),
        Err(err) => {
            warn!(error = %err, "failed to decode token expiry, using {FALLBACK_DAYS} day default");
            FALLBACK_DAYS
        }
    }
}

/// Extracts `exp` (unix seconds) from the second token segment.
///
/// # Errors
/// Returns an error if the token has no payload segment, the segment is not
/// base64url JSON, or `exp` is absent or not numeric.
pub fn expiry_claim(token: &str) -> Result<i64, TokenDecodeError> {
    let payload = token
        .trim()
        .split('.')
        .nth(1)
        .map(|segment| segment.trim_end_matches('='))
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenDecodeError::TokenFormat)?;

    let bytes = Base64UrlUnpadded::decode_vec(payload).map_err(|_| TokenDecodeError::Base64)?;
    let claims: Value = serde_json::from_slice(&bytes)?;

    claims
        .get("exp")
        .and_then(|exp| {
            exp.as_i64()
                // Some issuers emit fractional seconds.
                .or_else(|| exp.as_f64().map(|value| value.floor() as i64))
        })
        .ok_or(TokenDecodeError::MissingExp)
}

fn days_until(exp: i64, now_unix_seconds: i64) -> u64 {
    let remaining = exp.saturating_sub(now_unix_seconds);
    if remaining <= 0 {
        return 0;
    }
    remaining.unsigned_abs().div_ceil(SECONDS_PER_DAY)
}
