//! Auth feature covering the Telegram assertion exchange, token persistence
//! and session hydration. This module touches security boundaries and must
//! avoid logging token material.
//!
//! Flow Overview: bootstrap reads the cookie jar and validates the token with
//! `/auth/me`. Login exchanges an assertion at `/auth/telegram`, stores the
//! token with an expiry taken from its claim, then hydrates the profile. Logout
//! deletes the cookie and clears state without contacting the backend.

pub mod assertion;
pub mod codec;
pub mod context;
mod error;
pub mod gateway;
pub mod role;
pub mod storage;
pub mod store;
pub mod types;

pub use assertion::{AssertionError, IdentityAssertion};
pub use context::{AuthContext, BootPhase};
pub use error::{AuthError, EXCHANGE_FALLBACK_MESSAGE};
pub use gateway::AuthGateway;
pub use role::Role;
pub use storage::{CookieJar, CredentialStore, MemoryStore, StorageError, StoredCookie};
pub use store::{SessionState, SessionStore};
pub use types::{SessionToken, TokenInfo, UserProfile};
