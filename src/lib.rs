//! Session-aware admin console for the СТП employee API.
//!
//! ## Core Authentication Flow
//!
//! 1. **Assertion:** the Telegram login widget signs the user's identity. The
//!    console accepts the widget payload as JSON or as the redirect URL.
//! 2. **Exchange:** the assertion is POSTed to `/auth/telegram`, which returns a
//!    bearer token.
//! 3. **Persist:** the token is written to the cookie jar with an expiry derived
//!    from its `exp` claim.
//! 4. **Hydrate:** `/auth/me` returns the profile and the session flips to
//!    authenticated.
//!
//! On every start the stored token is validated again against `/auth/me`; a
//! rejected token is discarded silently. Token validity is decided by the
//! backend only, the client never verifies signatures.

pub mod api;
pub mod auth;
pub mod cli;
pub mod features;
pub mod ui;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
