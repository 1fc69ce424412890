//! Durable storage for the single live session token.
//!
//! The console keeps one cookie, `access_token`, in a cookie jar file. The
//! cookie carries an explicit `Expires` attribute computed from the token's
//! `exp` claim; an expired cookie reads as absent, the same way a browser
//! drops it. Writing a new token overwrites the previous one.

use crate::auth::types::SessionToken;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed storage key for the session token.
pub const TOKEN_KEY: &str = "access_token";

/// Upper bound on cookie lifetime so the expiry date stays formattable.
const MAX_COOKIE_DAYS: u64 = 2_000_000;
/// IMF-fixdate, as used by the `Expires` cookie attribute.
const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cookie jar I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed cookie: {0}")]
    Malformed(String),
    #[error("credential store lock poisoned")]
    Poisoned,
}

/// Durable client storage for the session token.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token unless it is missing or expired.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read or holds garbage.
    fn load(&self) -> Result<Option<SessionToken>, StorageError>;

    /// Stores `token`, replacing any previous value, for `days` days.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be written.
    fn save(&self, token: &SessionToken, days: u64) -> Result<(), StorageError>;

    /// Deletes the stored token. Deleting a missing token is not an error.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be written.
    fn remove(&self) -> Result<(), StorageError>;
}

/// A stored cookie with its absolute expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredCookie {
    pub token: SessionToken,
    pub expires: DateTime<Utc>,
}

impl StoredCookie {
    fn new(token: &SessionToken, days: u64, now: DateTime<Utc>) -> Self {
        Self {
            token: token.clone(),
            expires: expiry_after(now, days),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }

    /// Renders the cookie as a `Set-Cookie` style line.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{TOKEN_KEY}={}; Expires={}; Path=/",
            self.token.expose(),
            self.expires.format(COOKIE_DATE_FORMAT)
        )
    }

    /// Parses a `Set-Cookie` style line written by [`StoredCookie::to_line`].
    ///
    /// # Errors
    /// Returns an error if the line has a different name, an empty value, or no
    /// valid `Expires` attribute.
    pub fn parse(line: &str) -> Result<Self, StorageError> {
        let mut parts = line.trim().split(';').map(str::trim);

        let pair = parts
            .next()
            .ok_or_else(|| StorageError::Malformed("empty cookie".to_string()))?;
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| StorageError::Malformed("missing cookie value".to_string()))?;
        if name != TOKEN_KEY {
            return Err(StorageError::Malformed(format!("unexpected cookie {name}")));
        }
        if value.is_empty() {
            return Err(StorageError::Malformed("empty cookie value".to_string()));
        }

        let expires = parts
            .filter_map(|attribute| attribute.split_once('='))
            .find(|(key, _)| key.eq_ignore_ascii_case("expires"))
            .map(|(_, date)| date)
            .ok_or_else(|| StorageError::Malformed("missing Expires attribute".to_string()))?;
        let expires = NaiveDateTime::parse_from_str(expires, COOKIE_DATE_FORMAT)
            .map_err(|err| StorageError::Malformed(format!("invalid Expires attribute: {err}")))?
            .and_utc();

        Ok(Self {
            token: SessionToken::new(value),
            expires,
        })
    }
}

fn expiry_after(now: DateTime<Utc>, days: u64) -> DateTime<Utc> {
    let days = i64::try_from(days.min(MAX_COOKIE_DAYS)).unwrap_or_default();
    // Cookie dates have second precision.
    let now = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
    now.checked_add_signed(TimeDelta::days(days)).unwrap_or(now)
}

/// Cookie jar file holding the single session cookie.
#[derive(Clone, Debug)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw cookie, including an expired one.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is malformed.
    pub fn read_cookie(&self) -> Result<Option<StoredCookie>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => StoredCookie::parse(&content).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_cookie(&self, cookie: &StoredCookie) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        io::Write::write_all(&mut file, format!("{}\n", cookie.to_line()).as_bytes())?;
        Ok(())
    }
}

impl CredentialStore for CookieJar {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        let Some(cookie) = self.read_cookie()? else {
            return Ok(None);
        };

        if cookie.is_expired(Utc::now()) {
            debug!(path = %self.path.display(), "session cookie expired");
            if let Err(err) = self.remove() {
                warn!(error = %err, "failed to remove expired session cookie");
            }
            return Ok(None);
        }

        Ok(Some(cookie.token))
    }

    fn save(&self, token: &SessionToken, days: u64) -> Result<(), StorageError> {
        let cookie = StoredCookie::new(token, days, Utc::now());
        self.write_cookie(&cookie)?;
        debug!(path = %self.path.display(), expires = %cookie.expires, "session cookie stored");
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process credential storage, used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cookie: Mutex<Option<StoredCookie>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `token` already stored for `days` days.
    #[must_use]
    pub fn with_token(token: &SessionToken, days: u64) -> Self {
        Self {
            cookie: Mutex::new(Some(StoredCookie::new(token, days, Utc::now()))),
        }
    }

    /// Returns the raw cookie, including an expired one.
    ///
    /// # Errors
    /// Returns an error if the lock is poisoned.
    pub fn cookie(&self) -> Result<Option<StoredCookie>, StorageError> {
        Ok(self.cookie.lock().map_err(|_| StorageError::Poisoned)?.clone())
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        let mut cookie = self.cookie.lock().map_err(|_| StorageError::Poisoned)?;
        if cookie.as_ref().is_some_and(|c| c.is_expired(Utc::now())) {
            *cookie = None;
        }
        Ok(cookie.as_ref().map(|c| c.token.clone()))
    }

    fn save(&self, token: &SessionToken, days: u64) -> Result<(), StorageError> {
        let mut cookie = self.cookie.lock().map_err(|_| StorageError::Poisoned)?;
        *cookie = Some(StoredCookie::new(token, days, Utc::now()));
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        *self.cookie.lock().map_err(|_| StorageError::Poisoned)? = None;
        Ok(())
    }
}
