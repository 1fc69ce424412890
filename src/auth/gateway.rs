//! The two network calls of the auth protocol. Neither call retries: a
//! rejected assertion needs a fresh one from the widget, and a rejected token
//! means the session is gone.

use crate::{
    api::{self, ApiClient},
    auth::{
        assertion::IdentityAssertion,
        error::{AuthError, EXCHANGE_FALLBACK_MESSAGE},
        types::{SessionToken, TokenInfo, UserProfile},
    },
};
use tracing::{debug, instrument};

pub const EXCHANGE_PATH: &str = "/auth/telegram";
pub const PROFILE_PATH: &str = "/auth/me";

#[derive(Clone, Debug)]
pub struct AuthGateway {
    api: ApiClient,
}

impl AuthGateway {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Exchanges a Telegram assertion for a bearer token.
    ///
    /// # Errors
    /// Returns `AuthError::Exchange` with the backend's `detail` (or a generic
    /// message) on a non-success status, `AuthError::Network` on transport
    /// failure.
    #[instrument(skip_all, fields(user_id = %assertion.id))]
    pub async fn exchange(&self, assertion: &IdentityAssertion) -> Result<TokenInfo, AuthError> {
        let request = self.api.post(EXCHANGE_PATH).json(assertion);
        let response = self.api.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = api::error_detail(&body)
                .unwrap_or_else(|| EXCHANGE_FALLBACK_MESSAGE.to_string());
            debug!(%status, %detail, "assertion rejected");
            return Err(AuthError::Exchange(detail));
        }

        let token_info: TokenInfo = response
            .json()
            .await
            .map_err(|err| AuthError::InvalidResponse(format!("Failed to decode token: {err}")))?;

        if token_info.access_token.trim().is_empty() {
            return Err(AuthError::InvalidResponse("empty access token".to_string()));
        }

        debug!(token_type = %token_info.token_type, "token issued");
        Ok(token_info)
    }

    /// Fetches the profile bound to `token`.
    ///
    /// # Errors
    /// Returns `AuthError::Profile` on any non-success status (401 included);
    /// callers treat it as an invalid session, not a transient failure.
    #[instrument(skip_all)]
    pub async fn fetch_profile(&self, token: &SessionToken) -> Result<UserProfile, AuthError> {
        let request = self.api.get(PROFILE_PATH).bearer_auth(token.expose());
        let response = self.api.send(request).await?;

        let profile: UserProfile = api::handle_json_response(response).await?;
        debug!(user_id = profile.user_id, role = profile.role.id(), "profile fetched");
        Ok(profile)
    }
}
