use crate::{
    api::{self, ApiClient, ApiError},
    auth::SessionToken,
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ACHIEVEMENTS_PATH: &str = "/achievements/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub division: String,
    pub kpi: String,
    /// Reward in points.
    pub reward: i64,
    pub position: String,
    /// How often the achievement can be earned (day, week, month, manual).
    pub period: String,
}

#[derive(Deserialize)]
struct AchievementsList {
    achievements: Vec<Achievement>,
}

/// Lists achievements, optionally narrowed to one division. A 404 means the
/// catalogue is empty.
///
/// # Errors
/// Returns an error on transport failure or any other non-success status.
pub async fn list(
    api: &ApiClient,
    token: &SessionToken,
    division: Option<&str>,
) -> Result<Vec<Achievement>, ApiError> {
    let mut request = api.get(ACHIEVEMENTS_PATH).bearer_auth(token.expose());
    if let Some(division) = division.map(str::trim).filter(|d| !d.is_empty()) {
        request = request.query(&[("division", division)]);
    }

    let response = api.send(request).await?;
    if response.status() == StatusCode::NOT_FOUND {
        debug!("no achievements found");
        return Ok(Vec::new());
    }

    let list: AchievementsList = api::handle_json_response(response).await?;
    Ok(list.achievements)
}
