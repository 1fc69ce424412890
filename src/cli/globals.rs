use crate::{
    api::ApiClient,
    auth::{AuthContext, AuthGateway, CookieJar},
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Location of the cookie jar relative to the home directory.
pub const DEFAULT_SESSION_FILE: &str = ".stp-admin/session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
    pub bot_name: Option<String>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, session_file: Option<PathBuf>) -> Self {
        Self {
            api_url,
            session_file: session_file.unwrap_or_else(default_session_file),
            bot_name: None,
        }
    }

    pub fn set_bot_name(&mut self, bot_name: Option<String>) {
        self.bot_name = bot_name
            .map(|name| name.trim().trim_start_matches('@').to_string())
            .filter(|name| !name.is_empty());
    }

    /// # Errors
    /// Returns an error if the API URL is unusable.
    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.api_url).context("invalid --api-url")
    }

    /// Builds the session context backed by the cookie jar. Bootstrap is left
    /// to the caller.
    ///
    /// # Errors
    /// Returns an error if the API URL is unusable.
    pub fn auth_context(&self) -> Result<AuthContext<CookieJar>> {
        let gateway = AuthGateway::new(self.api_client()?);
        Ok(AuthContext::init(
            gateway,
            CookieJar::new(self.session_file.clone()),
        ))
    }
}

fn default_session_file() -> PathBuf {
    home::home_dir()
        .unwrap_or_default()
        .join(DEFAULT_SESSION_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionState;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "http://localhost:8000/api/v1".to_string(),
            Some(PathBuf::from("/tmp/session")),
        );
        assert_eq!(args.api_url, "http://localhost:8000/api/v1");
        assert_eq!(args.session_file, PathBuf::from("/tmp/session"));
        assert_eq!(args.bot_name, None);
    }

    #[test]
    fn test_default_session_file() {
        let args = GlobalArgs::new("http://localhost:8000".to_string(), None);
        assert!(args.session_file.ends_with(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn test_set_bot_name() {
        let mut args = GlobalArgs::new("http://localhost:8000".to_string(), None);
        args.set_bot_name(Some(" @stp_bot ".to_string()));
        assert_eq!(args.bot_name.as_deref(), Some("stp_bot"));

        args.set_bot_name(Some("  ".to_string()));
        assert_eq!(args.bot_name, None);
    }

    #[test]
    fn test_auth_context_starts_booting() {
        let args = GlobalArgs::new(
            "http://localhost:8000/api/v1".to_string(),
            Some(PathBuf::from("/tmp/session")),
        );
        let auth = args.auth_context().unwrap();
        assert_eq!(auth.state(), SessionState::booting());
        assert_eq!(auth.credentials().path(), PathBuf::from("/tmp/session"));
    }

    #[test]
    fn test_api_client_rejects_bad_url() {
        let args = GlobalArgs::new("not a url".to_string(), None);
        assert!(args.api_client().is_err());
    }
}
