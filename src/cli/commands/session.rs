use crate::api::DEFAULT_API_BASE_URL;
use clap::{Arg, ArgGroup, Command, builder::ValueParser};
use std::path::PathBuf;
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_BOT_NAME: &str = "bot-name";
pub const ARG_CALLBACK_URL: &str = "callback-url";
pub const ARG_ASSERTION: &str = "assertion";

#[must_use]
pub fn validator_api_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<String, String> {
        let url = Url::parse(value.trim()).map_err(|err| format!("invalid URL: {err}"))?;
        match url.scheme() {
            "http" | "https" => Ok(value.trim().trim_end_matches('/').to_string()),
            scheme => Err(format!("unsupported scheme: {scheme}")),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Backend API base URL")
                .default_value(DEFAULT_API_BASE_URL)
                .env("STP_API_BASE_URL")
                .global(true)
                .value_parser(validator_api_url()),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("Cookie jar holding the session token (default: ~/.stp-admin/session)")
                .env("STP_SESSION_FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_BOT_NAME)
                .long("bot-name")
                .help("Telegram bot used by the login widget")
                .env("STP_BOT_NAME")
                .global(true),
        )
}

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Sign in with a Telegram login widget payload")
        .arg(
            Arg::new(ARG_CALLBACK_URL)
                .long("callback-url")
                .help("Redirect URL produced by the widget, query string included"),
        )
        .arg(
            Arg::new(ARG_ASSERTION)
                .long("assertion")
                .help("Widget payload as JSON"),
        )
        .group(
            ArgGroup::new("source")
                .args([ARG_CALLBACK_URL, ARG_ASSERTION])
                .required(true),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new("logout").about("Forget the stored session")
}

#[must_use]
pub fn dashboard() -> Command {
    Command::new("dashboard").about("Show the signed-in user and dashboard counters (default)")
}
