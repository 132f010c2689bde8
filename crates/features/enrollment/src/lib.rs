//! # Enrollment
//!
//! Keeps every student's enrollments equal to the curriculum of their
//! section. The logic lives in [`EnrollmentSync`]; [`register`] hooks it to
//! the user and curriculum lifecycle events so it runs inside the same
//! changeset as the write that triggered it.
//!
//! | Event | Effect |
//! |---|---|
//! | [`UserCreated`](lyceum_kernel::domain::events::UserCreated) with a section | enroll in the section's subjects |
//! | [`UserUpdated`](lyceum_kernel::domain::events::UserUpdated), section changed | unenroll from `old - new`, enroll in `new` |
//! | [`CurriculumChanged`](lyceum_kernel::domain::events::CurriculumChanged) | enroll/unenroll the section's students |
//!
//! Non-students, deletions and restores are ignored.

mod error;
mod hooks;
mod sync;

pub use error::{EnrollmentError, EnrollmentErrorExt};
pub use hooks::{OnCurriculumChanged, OnUserCreated, OnUserUpdated, register};
pub use sync::{EnrollmentSync, SyncReport};
