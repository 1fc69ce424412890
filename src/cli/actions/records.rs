use crate::{
    cli::{actions::session::require_session, globals::GlobalArgs},
    features::{
        achievements,
        employees::{self, EmployeeFilters},
    },
    ui::render,
};
use anyhow::{Context, Result};

/// # Errors
/// Returns an error without a valid session or if the backend refuses the list.
pub async fn employees(globals: &GlobalArgs, filters: &EmployeeFilters) -> Result<()> {
    let auth = globals.auth_context()?;
    let token = require_session(&auth).await?;

    let list = employees::list(auth.gateway().api(), &token, filters)
        .await
        .context("failed to load employees")?;
    println!("{}", render::employees_table(&list));

    auth.dispose();
    Ok(())
}

/// # Errors
/// Returns an error without a valid session or if the backend refuses the list.
pub async fn achievements(globals: &GlobalArgs, division: Option<&str>) -> Result<()> {
    let auth = globals.auth_context()?;
    let token = require_session(&auth).await?;

    let list = achievements::list(auth.gateway().api(), &token, division)
        .await
        .context("failed to load achievements")?;
    println!("{}", render::achievements(&list));

    auth.dispose();
    Ok(())
}
