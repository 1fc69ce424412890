//! Client helpers for the employee directory. Authorization is enforced by the
//! backend; these helpers only attach the bearer token.

use crate::{
    api::{self, ApiClient, ApiError},
    auth::{Role, SessionToken},
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const EMPLOYEES_PATH: &str = "/employees/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub fullname: String,
    pub role: Role,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_trainee: bool,
    #[serde(default)]
    pub is_casino_allowed: bool,
    #[serde(default)]
    pub is_exchange_banned: bool,
}

#[derive(Deserialize)]
struct EmployeesList {
    employees: Vec<Employee>,
}

/// Server-side filters for the employee list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeFilters {
    pub main_id: Option<i64>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub head: Option<String>,
    pub roles: Vec<i64>,
}

impl EmployeeFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(main_id) = self.main_id {
            pairs.push(("main_id", main_id.to_string()));
        }
        if let Some(user_id) = self.user_id {
            pairs.push(("user_id", user_id.to_string()));
        }

        let text_filters = [
            ("username", &self.username),
            ("fullname", &self.fullname),
            ("email", &self.email),
            ("head", &self.head),
        ];
        for (key, value) in text_filters {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }

        pairs.extend(self.roles.iter().map(|role| ("roles", role.to_string())));
        pairs
    }
}

/// Lists employees matching `filters`. A 404 means "nobody matched".
///
/// # Errors
/// Returns an error on transport failure or any other non-success status.
pub async fn list(
    api: &ApiClient,
    token: &SessionToken,
    filters: &EmployeeFilters,
) -> Result<Vec<Employee>, ApiError> {
    let request = api
        .get(EMPLOYEES_PATH)
        .bearer_auth(token.expose())
        .query(&filters.query_pairs());
    let response = api.send(request).await?;

    if response.status() == StatusCode::NOT_FOUND {
        debug!("no employees matched");
        return Ok(Vec::new());
    }

    let list: EmployeesList = api::handle_json_response(response).await?;
    Ok(list.employees)
}

/// Outcome of the legacy employee-lookup access check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessCheck {
    pub has_access: bool,
    pub fullname: Option<String>,
    pub role: Option<Role>,
}

/// Legacy access check: a user "has access" when the directory knows their
/// Telegram id. The token exchange at `/auth/telegram` is authoritative; this
/// lookup grants nothing and is kept for older deployments only.
#[deprecated(note = "access is decided by the token exchange; use AuthContext::login")]
pub async fn check_user_access(api: &ApiClient, user_id: i64) -> AccessCheck {
    let request = api
        .get(EMPLOYEES_PATH)
        .query(&[("user_id", user_id.to_string())]);

    let response = match api.send(request).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "access check failed");
            return AccessCheck::default();
        }
    };

    if response.status() == StatusCode::NOT_FOUND {
        return AccessCheck::default();
    }

    match api::handle_json_response::<EmployeesList>(response).await {
        Ok(list) => list
            .employees
            .into_iter()
            .next()
            .map(|employee| AccessCheck {
                has_access: true,
                fullname: Some(employee.fullname),
                role: Some(employee.role),
            })
            .unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "access check failed");
            AccessCheck::default()
        }
    }
}
