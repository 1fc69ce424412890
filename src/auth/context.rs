//! Session lifecycle: bootstrap on start, login, logout.
//!
//! `AuthContext` owns the session store, the gateway and the credential
//! storage. It is created once per process with [`AuthContext::init`] and
//! passed by reference to whatever renders state; nothing else can mutate the
//! session. Tests build isolated instances the same way.

use crate::auth::{
    assertion::IdentityAssertion,
    codec,
    error::AuthError,
    gateway::AuthGateway,
    storage::CredentialStore,
    store::{SessionState, SessionStore},
    types::{SessionToken, UserProfile},
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Bootstrap progress: `Unknown -> Validating -> {Authenticated | Unauthenticated}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootPhase {
    Unknown,
    Validating,
    Authenticated,
    Unauthenticated,
}

pub struct AuthContext<S> {
    store: SessionStore,
    gateway: AuthGateway,
    credentials: S,
    booted: AtomicBool,
}

impl<S: CredentialStore> AuthContext<S> {
    /// Creates the context in the booting state (`loading = true`).
    pub fn init(gateway: AuthGateway, credentials: S) -> Self {
        debug!(api = gateway.api().base_url(), "session context initialized");
        Self {
            store: SessionStore::new(),
            gateway,
            credentials,
            booted: AtomicBool::new(false),
        }
    }

    /// Tears the context down; subscribers observe the channel closing.
    pub fn dispose(self) {
        debug!("session context disposed");
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    #[must_use]
    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    #[must_use]
    pub fn credentials(&self) -> &S {
        &self.credentials
    }

    /// Rehydrates the session from storage and validates it with the backend.
    /// Runs once; later calls report the settled phase without any I/O.
    /// Validation failures are silent: the token is discarded and the user
    /// simply lands on the login screen.
    #[instrument(skip_all)]
    pub async fn bootstrap(&self) -> BootPhase {
        if self.booted.swap(true, Ordering::SeqCst) {
            return self.settled_phase();
        }

        debug!(phase = ?BootPhase::Unknown, "session bootstrap");

        let token = match self.credentials.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.store.clear();
                debug!(phase = ?BootPhase::Unauthenticated, "no stored session");
                return BootPhase::Unauthenticated;
            }
            Err(err) => {
                warn!(error = %err, "stored session unreadable");
                self.discard();
                return BootPhase::Unauthenticated;
            }
        };

        debug!(phase = ?BootPhase::Validating, "validating stored session");

        match self.gateway.fetch_profile(&token).await {
            Ok(profile) => {
                info!(user_id = profile.user_id, "session restored");
                self.store.establish(profile, token);
                BootPhase::Authenticated
            }
            Err(err) => {
                info!(error = %err, "stored session rejected, signing out");
                self.discard();
                BootPhase::Unauthenticated
            }
        }
    }

    /// Runs one login attempt with a fresh assertion. A failure records the
    /// message in `state().error` and leaves storage holding whatever token the
    /// in-memory session still uses, or nothing when signed out.
    ///
    /// # Errors
    /// Returns `AuthError::Busy` without touching state while another
    /// operation (or bootstrap) is in flight; otherwise the error that ended
    /// the attempt.
    #[instrument(skip_all)]
    pub async fn login(&self, assertion: IdentityAssertion) -> Result<UserProfile, AuthError> {
        if !self.store.try_begin_loading() {
            return Err(AuthError::Busy);
        }

        match self.attempt_login(assertion).await {
            Ok((profile, token)) => {
                info!(user_id = profile.user_id, "signed in");
                self.store.establish(profile.clone(), token);
                Ok(profile)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.store.fail(err.to_string());
                Err(err)
            }
        }
    }

    async fn attempt_login(
        &self,
        assertion: IdentityAssertion,
    ) -> Result<(UserProfile, SessionToken), AuthError> {
        if assertion.user_id().is_none() {
            return Err(AuthError::AssertionMissingField);
        }

        let token_info = self.gateway.exchange(&assertion).await?;
        drop(assertion);

        let current = self.store.state();
        let previous = current.is_authenticated.then_some(current.token).flatten();

        let token = SessionToken::new(token_info.access_token);
        let days = codec::decode_expiry(token.expose());
        self.credentials.save(&token, days)?;
        debug!(days, "session token persisted");

        match self.gateway.fetch_profile(&token).await {
            Ok(profile) => Ok((profile, token)),
            Err(err) => {
                self.restore_credentials(previous.as_ref());
                Err(err)
            }
        }
    }

    /// Puts storage back in line with the live session after a half-finished
    /// login overwrote it.
    fn restore_credentials(&self, previous: Option<&SessionToken>) {
        let restored = match previous {
            Some(token) => self.credentials.save(token, codec::decode_expiry(token.expose())),
            None => self.credentials.remove(),
        };
        if let Err(err) = restored {
            warn!(error = %err, "failed to restore stored session");
        }
    }

    /// Forgets the session locally. The backend is not notified.
    ///
    /// # Errors
    /// Returns an error if the stored token could not be deleted; the in-memory
    /// session is cleared either way.
    pub fn logout(&self) -> Result<(), AuthError> {
        let removed = self.credentials.remove();
        self.store.clear();
        info!("signed out");
        removed.map_err(AuthError::from)
    }

    fn discard(&self) {
        if let Err(err) = self.credentials.remove() {
            warn!(error = %err, "failed to remove stored session");
        }
        self.store.clear();
    }

    fn settled_phase(&self) -> BootPhase {
        let state = self.store.state();
        if state.is_authenticated {
            BootPhase::Authenticated
        } else if state.loading && state.token.is_none() && state.error.is_none() {
            BootPhase::Validating
        } else {
            BootPhase::Unauthenticated
        }
    }
}
