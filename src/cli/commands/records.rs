use clap::{Arg, ArgAction, Command};

pub const ARG_MAIN_ID: &str = "main-id";
pub const ARG_USER_ID: &str = "user-id";
pub const ARG_USERNAME: &str = "username";
pub const ARG_FULLNAME: &str = "fullname";
pub const ARG_EMAIL: &str = "email";
pub const ARG_HEAD: &str = "head";
pub const ARG_ROLE: &str = "role";
pub const ARG_DIVISION: &str = "division";

#[must_use]
pub fn employees() -> Command {
    Command::new("employees")
        .about("List employees")
        .arg(
            Arg::new(ARG_MAIN_ID)
                .long("main-id")
                .help("Employee record id")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_USER_ID)
                .long("user-id")
                .help("Telegram user id")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_USERNAME)
                .long("username")
                .help("Telegram username"),
        )
        .arg(
            Arg::new(ARG_FULLNAME)
                .long("fullname")
                .help("Full name"),
        )
        .arg(Arg::new(ARG_EMAIL).long("email").help("Email address"))
        .arg(
            Arg::new(ARG_HEAD)
                .long("head")
                .help("Full name of the employee's head"),
        )
        .arg(
            Arg::new(ARG_ROLE)
                .long("role")
                .help("Role id, repeat to match several roles")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(i64)),
        )
}

#[must_use]
pub fn achievements() -> Command {
    Command::new("achievements")
        .about("List achievements")
        .arg(
            Arg::new(ARG_DIVISION)
                .long("division")
                .help("Only achievements of this division (НТП, НЦК)"),
        )
}

#[must_use]
pub fn health() -> Command {
    Command::new("health").about("Probe the backend and print client build information")
}
