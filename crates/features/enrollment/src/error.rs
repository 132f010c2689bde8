use lyceum_kernel::PersistenceError;
use std::borrow::Cow;

/// A specialized [`EnrollmentError`] enum of this crate.
#[lyceum_derive::lyceum_error]
pub enum EnrollmentError {
    /// A store read failed while computing enrollments.
    #[error("Enrollment sync failed{}: {source}", format_context(.context))]
    Persistence {
        #[source]
        source: PersistenceError,
        context: Option<Cow<'static, str>>,
    },
}
