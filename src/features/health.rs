//! Backend liveness probe.

use crate::api::{ApiClient, ApiError};
use chrono::{DateTime, Utc};
use std::{fmt, time::Duration};
use tracing::debug;

pub const HEALTH_PATH: &str = "/health";
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Unhealthy,
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Healthy => f.write_str("healthy"),
            Health::Unhealthy => f.write_str("unhealthy"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: Health,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

impl HealthStatus {
    fn healthy() -> Self {
        Self {
            status: Health::Healthy,
            timestamp: Utc::now(),
            details: None,
        }
    }

    fn unhealthy(details: impl Into<String>) -> Self {
        Self {
            status: Health::Unhealthy,
            timestamp: Utc::now(),
            details: Some(details.into()),
        }
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == Health::Healthy
    }
}

/// Probes `GET {base}/health`. Never fails: every problem is reported as an
/// unhealthy status with details.
pub async fn check(api: &ApiClient) -> HealthStatus {
    check_with_timeout(api, HEALTH_TIMEOUT).await
}

pub(crate) async fn check_with_timeout(api: &ApiClient, timeout: Duration) -> HealthStatus {

    let request = api.get(HEALTH_PATH).timeout(timeout);

    let status = match api.send(request).await {
        Ok(response) if response.status().is_success() => HealthStatus::healthy(),
        Ok(response) => HealthStatus::unhealthy(format!("HTTP {}", response.status().as_u16())),
        Err(ApiError::Timeout(message) | ApiError::Network(message)) => {
            HealthStatus::unhealthy(message)
        }
        Err(err) => HealthStatus::unhealthy(err.to_string()),
    };

    debug!(status = %status.status, details = ?status.details, "health probe");
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn ok_response_is_healthy() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"ok"}"#))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let status = check(&api).await;
        assert!(status.is_healthy());
        assert_eq!(status.details, None);
    }

    #[tokio::test]
    async fn error_status_is_unhealthy() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let status = check(&api).await;
        assert_eq!(status.status, Health::Unhealthy);
        assert_eq!(status.details.as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let status = check_with_timeout(&api, Duration::from_millis(50)).await;
        assert_eq!(status.status, Health::Unhealthy);
        assert_eq!(
            status.details.as_deref(),
            Some("Request timed out. Please try again.")
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_unhealthy() {
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let status = check(&api).await;
        assert_eq!(status.status, Health::Unhealthy);
        let details = status.details.unwrap_or_default();
        assert!(details.starts_with("Unable to reach the server"));
    }
}
