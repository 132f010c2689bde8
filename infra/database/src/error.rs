use lyceum_kernel::PersistenceError;
use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[lyceum_derive::lyceum_error]
pub enum DatabaseError {
    /// Validation errors.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when authentication fails.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Migration failures or checksum drift.
    #[error("Migration error{}: {message}", format_context(.context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues, e.g. rows that do not decode.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<DatabaseError> for PersistenceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Connection { .. } | DatabaseError::Auth { .. } => {
                Self::Unavailable { message: err.to_string().into(), context: None }
            },
            _ => Self::Internal { message: err.to_string().into(), context: None },
        }
    }
}
