//! HTTP helpers for the СТП backend with consistent URL building and error
//! handling. Feature clients use these helpers to avoid duplicating request
//! setup. The helpers never store tokens; callers attach bearer credentials per
//! request and must not log them.

mod errors;

pub use errors::ApiError;

use crate::APP_USER_AGENT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, debug, info_span};
use url::Url;

/// Default API base, matching the backend's development address.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

/// Thin client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url.trim())
            .map_err(|err| ApiError::Config(format!("invalid API base URL: {err}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::Config(format!(
                    "unsupported API URL scheme: {scheme}"
                )))
            }
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a URL from the configured base URL and the provided path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.endpoint(path))
    }

    /// Sends a request and maps transport failures into `ApiError`.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build request: {err}")))?;

        let span = info_span!(
            "api.request",
            http.method = %request.method(),
            url = %request.url().path()
        );

        let response = self
            .client
            .execute(request)
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        debug!(status = %response.status(), "api response");

        Ok(response)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `ApiError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
pub(crate) async fn handle_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ApiError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status,
            message: sanitize_body(&body),
        })
    }
}

/// Extracts the backend's `{"detail": "..."}` error message, if any.
/// Validation errors carry a list in `detail`; those yield `None`.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("detail")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(|detail| detail.chars().take(MAX_ERROR_CHARS).collect())
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    if let Some(detail) = error_detail(body) {
        return detail;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("http://localhost:8000/api/v1/", "/auth/me"),
            "http://localhost:8000/api/v1/auth/me"
        );
        assert_eq!(
            build_url_with_base("http://localhost:8000/api/v1", "employees/"),
            "http://localhost:8000/api/v1/employees/"
        );
        assert_eq!(build_url_with_base("  ", "/health"), "/health");
    }

    #[test]
    fn new_rejects_unsupported_scheme() {
        let err = ApiClient::new("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported API URL scheme"));
    }

    #[test]
    fn new_rejects_relative_url() {
        assert!(matches!(
            ApiClient::new("/api/v1"),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn new_strips_trailing_slash() {
        let api = ApiClient::new("https://stp.example/api/v1/").unwrap();
        assert_eq!(api.base_url(), "https://stp.example/api/v1");
        assert_eq!(api.endpoint("/auth/me"), "https://stp.example/api/v1/auth/me");

        let api = ApiClient::new("http://127.0.0.1:9000").unwrap();
        assert_eq!(api.endpoint("/health"), "http://127.0.0.1:9000/health");
    }

    #[test]
    fn error_detail_reads_string_detail_only() {
        assert_eq!(
            error_detail(r#"{"detail":"invalid hash"}"#),
            Some("invalid hash".to_string())
        );
        assert_eq!(error_detail(r#"{"detail":[{"loc":["body","hash"]}]}"#), None);
        assert_eq!(error_detail(r#"{"detail":"  "}"#), None);
        assert_eq!(error_detail("<html>bad gateway</html>"), None);
    }

    #[test]
    fn sanitize_body_prefers_detail_and_truncates() {
        assert_eq!(sanitize_body(r#"{"detail":"nope"}"#), "nope");
        assert_eq!(sanitize_body("   "), "Request failed.");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
    }
}
