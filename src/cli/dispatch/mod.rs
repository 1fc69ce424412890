use crate::{
    cli::{
        actions::{Action, session::AssertionSource},
        commands::{records, session},
        globals::GlobalArgs,
    },
    features::employees::EmployeeFilters,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// # Errors
/// Returns an error if a required global argument is missing.
pub fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(session::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;
    let session_file = matches.get_one::<PathBuf>(session::ARG_SESSION_FILE).cloned();

    let mut globals = GlobalArgs::new(api_url, session_file);
    globals.set_bot_name(matches.get_one::<String>(session::ARG_BOT_NAME).cloned());
    Ok(globals)
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("login", sub_m)) => {
            let source = if let Some(url) = sub_m.get_one::<String>(session::ARG_CALLBACK_URL) {
                AssertionSource::CallbackUrl(url.clone())
            } else {
                sub_m
                    .get_one::<String>(session::ARG_ASSERTION)
                    .cloned()
                    .map(AssertionSource::Json)
                    .context("missing required argument: --callback-url or --assertion")?
            };
            Ok(Action::Login(source))
        }
        Some(("logout", _)) => Ok(Action::Logout),
        Some(("employees", sub_m)) => Ok(Action::Employees(employee_filters(sub_m))),
        Some(("achievements", sub_m)) => Ok(Action::Achievements {
            division: sub_m.get_one::<String>(records::ARG_DIVISION).cloned(),
        }),
        Some(("health", _)) => Ok(Action::Health),
        _ => Ok(Action::Dashboard),
    }
}

fn employee_filters(matches: &clap::ArgMatches) -> EmployeeFilters {
    let text = |id: &str| matches.get_one::<String>(id).cloned();

    EmployeeFilters {
        main_id: matches.get_one::<i64>(records::ARG_MAIN_ID).copied(),
        user_id: matches.get_one::<i64>(records::ARG_USER_ID).copied(),
        username: text(records::ARG_USERNAME),
        fullname: text(records::ARG_FULLNAME),
        email: text(records::ARG_EMAIL),
        head: text(records::ARG_HEAD),
        roles: matches
            .get_many::<i64>(records::ARG_ROLE)
            .map(|roles| roles.copied().collect())
            .unwrap_or_default(),
    }
}
