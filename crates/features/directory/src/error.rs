use lyceum_event_bus::EventBusError;
use lyceum_kernel::PersistenceError;
use std::borrow::Cow;

/// A specialized [`DirectoryError`] enum of this crate.
#[lyceum_derive::lyceum_error]
pub enum DirectoryError {
    /// The request is malformed or conflicts with stored data.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The addressed record does not exist.
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The store failed to read or commit.
    #[error("Persistence error{}: {source}", format_context(.context))]
    Persistence {
        #[source]
        source: PersistenceError,
        context: Option<Cow<'static, str>>,
    },

    /// A lifecycle hook failed; nothing was committed.
    #[error("Lifecycle hook failed{}: {source}", format_context(.context))]
    Hook {
        #[source]
        source: EventBusError,
        context: Option<Cow<'static, str>>,
    },
}

impl DirectoryError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }
}
