//! Counters shown on the dashboard cards.

use crate::{
    api::ApiClient,
    auth::SessionToken,
    features::{achievements, employees},
};
use tracing::warn;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub employees: usize,
    pub achievements: usize,
}

/// Fetches both counters concurrently. A list that fails to load counts as
/// zero; the failure is logged and never blocks the dashboard.
pub async fn summary(api: &ApiClient, token: &SessionToken) -> DashboardSummary {
    let filters = employees::EmployeeFilters::default();
    let (employees, achievements) = tokio::join!(
        employees::list(api, token, &filters),
        achievements::list(api, token, None)
    );

    DashboardSummary {
        employees: employees.map(|list| list.len()).unwrap_or_else(|err| {
            warn!(error = %err, "failed to load employees");
            0
        }),
        achievements: achievements.map(|list| list.len()).unwrap_or_else(|err| {
            warn!(error = %err, "failed to load achievements");
            0
        }),
    }
}
