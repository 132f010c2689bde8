use std::borrow::Cow;

/// Errors that can occur while dispatching lifecycle events.
#[lyceum_derive::lyceum_error]
pub enum EventBusError {
    /// A subscriber failed. The context names the handler type.
    #[error("Hook failed{}: {source}", format_context(.context))]
    Handler {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },

    /// Occurs when an internal dynamic cast fails.
    /// This usually indicates an invariant violation in the handler registry.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl EventBusError {
    /// Returns the error reported by the failing handler, if any.
    #[must_use]
    pub fn handler_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Handler { source, .. } => Some(source.as_ref()),
            Self::TypeMismatch { .. } => None,
        }
    }

    /// Recovers the concrete handler error when it has type `E`.
    ///
    /// # Errors
    /// Gives `self` back unchanged when the error is not a handler failure of type `E`.
    pub fn downcast_handler<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::Handler { source, context } => match source.downcast::<E>() {
                Ok(inner) => Ok(*inner),
                Err(source) => Err(Self::Handler { source, context }),
            },
            other @ Self::TypeMismatch { .. } => Err(other),
        }
    }
}
