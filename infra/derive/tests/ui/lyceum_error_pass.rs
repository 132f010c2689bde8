use lyceum_derive::lyceum_error;
use std::borrow::Cow;

#[lyceum_error]
pub enum RosterError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown section{}: {message}", format_context(.context))]
    UnknownSection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_roster() -> Result<String, RosterError> {
    std::fs::read_to_string("/definitely/missing/roster.toml").context("Reading roster")
}

fn main() {
    let err = read_roster().unwrap_err();
    assert!(err.to_string().starts_with("IO error (Reading roster): "));

    let err: RosterError = "boom".into();
    assert_eq!(err.to_string(), "Internal error: boom");

    let err: Result<(), RosterError> =
        Err(RosterError::UnknownSection { message: "10-Z".into(), context: None });
    let err = err.context("Assigning student").unwrap_err();
    assert_eq!(err.to_string(), "Unknown section (Assigning student): 10-Z");
}
