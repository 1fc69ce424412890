//! Identity assertions produced by the Telegram login widget.
//!
//! The widget either calls back with a JSON object or redirects the browser to
//! a URL carrying the same fields as query parameters. Both forms are accepted.
//! The signature (`hash`) is verified by the backend only.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AssertionError {
    #[error("invalid callback URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid assertion JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("assertion is missing `{0}`")]
    MissingField(&'static str),
}

/// Signed identity data, consumed by exactly one login attempt.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAssertion {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub first_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty"
    )]
    pub last_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty"
    )]
    pub username: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty"
    )]
    pub photo_url: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub auth_date: String,
    pub hash: String,
}

impl IdentityAssertion {
    /// Parses the widget's JSON callback payload.
    ///
    /// # Errors
    /// Returns an error if the payload is not valid JSON or lacks required fields.
    pub fn from_json(payload: &str) -> Result<Self, AssertionError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Parses the redirect URL the widget sends the browser to.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed or lacks `first_name`,
    /// `auth_date` or `hash`.
    pub fn from_callback_url(callback_url: &str) -> Result<Self, AssertionError> {
        let url = Url::parse(callback_url.trim())?;

        let mut assertion = PartialAssertion::default();
        for (key, value) in url.query_pairs() {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "id" => assertion.id = Some(value),
                "first_name" => assertion.first_name = Some(value),
                "last_name" => assertion.last_name = Some(value),
                "username" => assertion.username = Some(value),
                "photo_url" => assertion.photo_url = Some(value),
                "auth_date" => assertion.auth_date = Some(value),
                "hash" => assertion.hash = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            id: assertion.id.unwrap_or_default(),
            first_name: assertion
                .first_name
                .ok_or(AssertionError::MissingField("first_name"))?,
            last_name: assertion.last_name,
            username: assertion.username,
            photo_url: assertion.photo_url,
            auth_date: assertion
                .auth_date
                .ok_or(AssertionError::MissingField("auth_date"))?,
            hash: assertion.hash.ok_or(AssertionError::MissingField("hash"))?,
        })
    }

    /// Returns the Telegram user id, if the widget supplied one.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        let id = self.id.trim();
        (!id.is_empty()).then_some(id)
    }
}

#[derive(Default)]
struct PartialAssertion {
    id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    username: Option<String>,
    photo_url: Option<String>,
    auth_date: Option<String>,
    hash: Option<String>,
}

// The widget sends `id` and `auth_date` as numbers; the backend expects strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_accepts_numeric_fields() {
        let assertion = IdentityAssertion::from_json(
            r#"{"id":42,"first_name":"A","username":"","auth_date":1700000000,"hash":"deadbeef"}"#,
        )
        .expect("assertion should parse");

        assert_eq!(assertion.id, "42");
        assert_eq!(assertion.auth_date, "1700000000");
        assert_eq!(assertion.username, None);
        assert_eq!(assertion.user_id(), Some("42"));
    }

    #[test]
    fn serialization_skips_absent_optionals() {
        let assertion = IdentityAssertion::from_json(
            r#"{"id":"42","first_name":"A","auth_date":"1700000000","hash":"deadbeef"}"#,
        )
        .expect("assertion should parse");

        let value = serde_json::to_value(&assertion).expect("assertion should encode");
        assert_eq!(
            value,
            json!({
                "id": "42",
                "first_name": "A",
                "auth_date": "1700000000",
                "hash": "deadbeef"
            })
        );
    }

    #[test]
    fn missing_id_parses_but_has_no_user_id() {
        let assertion = IdentityAssertion::from_json(
            r#"{"first_name":"A","auth_date":"1700000000","hash":"deadbeef"}"#,
        )
        .expect("assertion should parse");
        assert_eq!(assertion.user_id(), None);
    }

    #[test]
    fn from_json_rejects_missing_hash() {
        let err = IdentityAssertion::from_json(r#"{"id":1,"first_name":"A","auth_date":1}"#)
            .unwrap_err();
        assert!(matches!(err, AssertionError::InvalidJson(_)));
    }

    #[test]
    fn from_callback_url_reads_query() {
        let assertion = IdentityAssertion::from_callback_url(
            "https://stp.example/login?id=42&first_name=%D0%90%D0%BD%D0%BD%D0%B0&username=anna&photo_url=https%3A%2F%2Ft.me%2Fi%2Fa.jpg&auth_date=1700000000&hash=deadbeef",
        )
        .expect("callback should parse");

        assert_eq!(assertion.id, "42");
        assert_eq!(assertion.first_name, "Анна");
        assert_eq!(assertion.last_name, None);
        assert_eq!(assertion.username.as_deref(), Some("anna"));
        assert_eq!(assertion.photo_url.as_deref(), Some("https://t.me/i/a.jpg"));
        assert_eq!(assertion.hash, "deadbeef");
    }

    #[test]
    fn from_callback_url_requires_hash() {
        let err = IdentityAssertion::from_callback_url(
            "https://stp.example/login?id=42&first_name=A&auth_date=1700000000",
        )
        .unwrap_err();
        assert!(matches!(err, AssertionError::MissingField("hash")));
    }

    #[test]
    fn from_callback_url_rejects_garbage() {
        assert!(matches!(
            IdentityAssertion::from_callback_url("not a url"),
            Err(AssertionError::InvalidUrl(_))
        ));
    }
}
