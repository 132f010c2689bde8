use std::borrow::Cow;

/// Failures reported by a store.
///
/// Nothing is retried: the error travels back to whoever started the write
/// and the pending changeset is dropped.
#[lyceum_derive::lyceum_error]
pub enum PersistenceError {
    /// The backing store could not be reached.
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The store refused the write, e.g. a dangling reference or a constraint violation.
    #[error("Write rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Unexpected failures, e.g. rows that do not decode.
    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl PersistenceError {
    pub fn unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unavailable { message: message.into(), context: None }
    }

    pub fn rejected(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Rejected { message: message.into(), context: None }
    }
}
