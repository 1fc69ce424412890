use crate::{
    auth::{
        AssertionError, AuthContext, BootPhase, CredentialStore, IdentityAssertion, SessionToken,
    },
    cli::globals::GlobalArgs,
    features::dashboard,
    ui::{View, gate, render},
};
use anyhow::{Context, Result, bail};
use tracing::debug;

/// Where the login widget payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionSource {
    CallbackUrl(String),
    Json(String),
}

impl AssertionSource {
    /// # Errors
    /// Returns an error if the payload cannot be parsed into an assertion.
    pub fn parse(&self) -> Result<IdentityAssertion, AssertionError> {
        match self {
            AssertionSource::CallbackUrl(url) => IdentityAssertion::from_callback_url(url),
            AssertionSource::Json(payload) => IdentityAssertion::from_json(payload),
        }
    }
}

/// Bootstraps, then signs in unless a valid session already exists.
///
/// # Errors
/// Returns an error if the payload is unusable or the backend refuses the
/// login; the message is the user-facing notification.
pub async fn login(globals: &GlobalArgs, source: AssertionSource) -> Result<()> {
    let auth = globals.auth_context()?;

    if auth.bootstrap().await == BootPhase::Authenticated {
        if let View::Dashboard(profile) = gate(&auth.state()) {
            println!("{}", render::already_signed_in(&profile));
        }
        auth.dispose();
        return Ok(());
    }

    let assertion = source.parse().context("invalid login widget payload")?;

    match auth.login(assertion).await {
        Ok(profile) => {
            println!("{}", render::profile_card(&profile));
            print_summary(&auth).await;
            auth.dispose();
            Ok(())
        }
        Err(err) => {
            let state = auth.state();
            println!(
                "{}",
                render::view(
                    &gate(&state),
                    globals.bot_name.as_deref(),
                    state.error.as_deref()
                )
            );
            auth.dispose();
            bail!("Authentication failed: {err}")
        }
    }
}

/// # Errors
/// Returns an error if the cookie jar could not be deleted.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.auth_context()?;
    auth.logout()
        .with_context(|| format!("failed to remove {}", globals.session_file.display()))?;
    println!("Вы вышли из системы");
    Ok(())
}

/// Renders whatever the gate picks for the restored session.
///
/// # Errors
/// Returns an error if the API URL is unusable.
pub async fn dashboard(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.auth_context()?;
    let phase = auth.bootstrap().await;
    debug!(?phase, "bootstrap finished");

    let state = auth.state();
    let view = gate(&state);
    println!(
        "{}",
        render::view(&view, globals.bot_name.as_deref(), state.error.as_deref())
    );

    if matches!(view, View::Dashboard(_)) {
        print_summary(&auth).await;
    }

    auth.dispose();
    Ok(())
}

/// Restores the session and returns its token.
///
/// # Errors
/// Returns an error when no valid session exists.
pub(crate) async fn require_session<S: CredentialStore>(
    auth: &AuthContext<S>,
) -> Result<SessionToken> {
    auth.bootstrap().await;
    let state = auth.state();
    if !state.is_authenticated {
        bail!("not signed in, run `stp-admin login` first");
    }
    state
        .token
        .context("not signed in, run `stp-admin login` first")
}

async fn print_summary<S: CredentialStore>(auth: &AuthContext<S>) {
    if let Some(token) = auth.state().token {
        let summary = dashboard::summary(auth.gateway().api(), &token).await;
        println!("\n{}", render::summary(&summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CookieJar, CredentialStore};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjk5OTk5OTk5OTl9.sig";
    const PAYLOAD: &str =
        r#"{"id":42,"first_name":"A","auth_date":1700000000,"hash":"deadbeef"}"#;

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn globals(server: &MockServer, dir: &tempfile::TempDir) -> GlobalArgs {
        GlobalArgs::new(server.uri(), Some(dir.path().join("session")))
    }

    async fn mount_backend(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/auth/telegram"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": TOKEN,
                "token_type": "bearer"
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_id": 42,
                "fullname": "A",
                "role": 1
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/employees/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "employees": [] })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/achievements/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(server)
            .await;
    }

    #[test]
    fn assertion_source_parses_both_forms() {
        let from_json = AssertionSource::Json(PAYLOAD.to_string()).parse().unwrap();
        assert_eq!(from_json.id, "42");

        let from_url = AssertionSource::CallbackUrl(
            "https://stp.example/login?id=42&first_name=A&auth_date=1700000000&hash=deadbeef"
                .to_string(),
        )
        .parse()
        .unwrap();
        assert_eq!(from_url, from_json);
    }

    #[tokio::test]
    async fn login_then_logout() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        mount_backend(&server).await;
        let dir = tempfile::tempdir().unwrap();
        let globals = globals(&server, &dir);

        login(&globals, AssertionSource::Json(PAYLOAD.to_string()))
            .await
            .unwrap();
        let jar = CookieJar::new(globals.session_file.clone());
        assert_eq!(jar.load().unwrap(), Some(SessionToken::new(TOKEN)));

        // A second login with a valid session does not exchange again.
        login(&globals, AssertionSource::Json(PAYLOAD.to_string()))
            .await
            .unwrap();
        let exchanges = server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == "/auth/telegram")
            .count();
        assert_eq!(exchanges, 1);

        logout(&globals).unwrap();
        assert_eq!(jar.load().unwrap(), None);
        assert!(!globals.session_file.exists());
    }

    #[tokio::test]
    async fn rejected_login_is_an_error() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/telegram"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "invalid hash"
            })))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let globals = globals(&server, &dir);

        let err = login(&globals, AssertionSource::Json(PAYLOAD.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Authentication failed: invalid hash");
        assert!(!globals.session_file.exists());
    }

    #[tokio::test]
    async fn require_session_refuses_anonymous() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let auth = globals(&server, &dir).auth_context().unwrap();

        let err = require_session(&auth).await.unwrap_err();
        assert!(err.to_string().contains("not signed in"));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn dashboard_without_session_shows_login() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        dashboard(&globals(&server, &dir)).await.unwrap();
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
