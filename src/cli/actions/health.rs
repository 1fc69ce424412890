use crate::{GIT_COMMIT_HASH, cli::globals::GlobalArgs, features::health as probe, ui::render};
use anyhow::{Result, bail};

/// Probes the backend and prints client build information.
///
/// # Errors
/// Returns an error if the API URL is unusable or the backend is unhealthy.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let api = globals.api_client()?;
    let status = probe::check(&api).await;

    println!(
        "{}",
        render::health(&status, env!("CARGO_PKG_VERSION"), GIT_COMMIT_HASH)
    );

    if !status.is_healthy() {
        bail!("API at {} is unhealthy", api.base_url());
    }
    Ok(())
}
