use crate::cli::{
    actions::{Action, health, records, session},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Login(source) => session::login(globals, source).await,
        Action::Logout => session::logout(globals),
        Action::Dashboard => session::dashboard(globals).await,
        Action::Employees(filters) => records::employees(globals, &filters).await,
        Action::Achievements { division } => {
            records::achievements(globals, division.as_deref()).await
        }
        Action::Health => health::execute(globals).await,
    }
}
