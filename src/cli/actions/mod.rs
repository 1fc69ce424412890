pub mod health;
pub mod records;
pub mod session;

// Internal "interpreter" for `Action`.
mod run;

use crate::{cli::globals::GlobalArgs, features::employees::EmployeeFilters};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login(session::AssertionSource),
    Logout,
    Dashboard,
    Employees(EmployeeFilters),
    Achievements { division: Option<String> },
    Health,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
