//! Reactive container for the session state. Every mutation is a single send
//! on a `watch` channel, so observers never see a half-applied transition.
//! Only `AuthContext` holds the mutating side.

use crate::auth::types::{SessionToken, UserProfile};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Aggregate auth state. `is_authenticated` implies `profile.is_some()`.
/// `Default` is the cleared state: unauthenticated and not loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub profile: Option<UserProfile>,
    pub token: Option<SessionToken>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_validated: Option<DateTime<Utc>>,
}

impl SessionState {
    /// State at process start, before bootstrap has looked at storage.
    #[must_use]
    pub fn booting() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<SessionState>,
}

impl SessionStore {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(SessionState::booting());
        Self { sender }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Marks an operation as running and clears the previous error. Refuses
    /// (and changes nothing) when an operation is already running.
    pub(crate) fn try_begin_loading(&self) -> bool {
        self.sender.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            state.loading = true;
            state.error = None;
            true
        })
    }

    pub(crate) fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.sender.send_modify(|state| {
            state.error = Some(message);
            state.loading = false;
        });
    }

    pub(crate) fn establish(&self, profile: UserProfile, token: SessionToken) {
        self.sender.send_replace(SessionState {
            is_authenticated: true,
            profile: Some(profile),
            token: Some(token),
            loading: false,
            error: None,
            last_validated: Some(Utc::now()),
        });
    }

    pub(crate) fn clear(&self) {
        self.sender.send_replace(SessionState::default());
    }
}
