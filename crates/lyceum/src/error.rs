use lyceum_database::DatabaseError;
use lyceum_directory::DirectoryError;
use lyceum_enrollment::EnrollmentError;
use std::borrow::Cow;

/// Errors surfaced by the facade.
#[lyceum_derive::lyceum_error]
pub enum LyceumError {
    #[error("{source}{}", format_context(.context))]
    Directory { source: DirectoryError, context: Option<Cow<'static, str>> },

    #[error("{source}{}", format_context(.context))]
    Enrollment { source: EnrollmentError, context: Option<Cow<'static, str>> },

    #[error("Database setup failed{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },
}
