pub mod logging;
pub mod records;
pub mod session;

use clap::{
    ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("stp-admin")
        .about("СТП admin console")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand(session::login())
        .subcommand(session::logout())
        .subcommand(session::dashboard())
        .subcommand(records::employees())
        .subcommand(records::achievements())
        .subcommand(records::health());

    let command = session::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "stp-admin");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("СТП admin console".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
        command.debug_assert();
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("STP_API_BASE_URL", None::<&str>),
                ("STP_SESSION_FILE", None),
                ("STP_BOT_NAME", None),
                ("STP_LOG_LEVEL", None),
                ("STP_LOG_JSON", None),
            ],
            || {
                let matches = new().get_matches_from(["stp-admin"]);
                assert_eq!(
                    matches.get_one::<String>(session::ARG_API_URL).cloned(),
                    Some("http://localhost:8000/api/v1".to_string())
                );
                assert_eq!(matches.get_one::<PathBuf>(session::ARG_SESSION_FILE), None);
                assert_eq!(matches.get_one::<String>(session::ARG_BOT_NAME), None);
                assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(0));
                assert!(!matches.get_flag(logging::ARG_LOG_JSON));
                assert!(matches.subcommand().is_none());
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("STP_API_BASE_URL", Some("https://stp.example/api/v1/")),
                ("STP_SESSION_FILE", Some("/tmp/stp/session")),
                ("STP_BOT_NAME", Some("stp_bot")),
                ("STP_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(["stp-admin", "logout"]);
                assert_eq!(
                    matches.get_one::<String>(session::ARG_API_URL).cloned(),
                    Some("https://stp.example/api/v1".to_string())
                );
                assert_eq!(
                    matches.get_one::<PathBuf>(session::ARG_SESSION_FILE).cloned(),
                    Some(PathBuf::from("/tmp/stp/session"))
                );
                assert_eq!(
                    matches.get_one::<String>(session::ARG_BOT_NAME).cloned(),
                    Some("stp_bot".to_string())
                );
                assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_rejects_bad_api_url() {
        temp_env::with_vars([("STP_API_BASE_URL", None::<&str>)], || {
            assert!(new()
                .try_get_matches_from(["stp-admin", "--api-url", "ftp://stp.example"])
                .is_err());
            assert!(new()
                .try_get_matches_from(["stp-admin", "--api-url", "not a url"])
                .is_err());
        });
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("STP_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(["stp-admin"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_u8 {
            temp_env::with_vars([("STP_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["stp-admin".to_string(), "health".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(usize::from(index))));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index)
                );
            });
        }
    }

    #[test]
    fn test_login_requires_a_source() {
        assert!(new().try_get_matches_from(["stp-admin", "login"]).is_err());
        assert!(new()
            .try_get_matches_from([
                "stp-admin",
                "login",
                "--callback-url",
                "https://stp.example/?id=1",
                "--assertion",
                "{}",
            ])
            .is_err());
    }
}
