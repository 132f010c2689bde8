//! Persistence contracts.
//!
//! Reads go straight to the store; writes only happen through
//! [`Store::commit`] with a [`Changeset`].

use crate::changeset::Changeset;
use crate::error::PersistenceError;
use lyceum_domain::{SectionId, SubjectId, User, UserId};
use std::collections::BTreeSet;
use std::future::Future;

/// Section and subject lookups.
pub trait Catalog: Send + Sync {
    /// Subjects in the curriculum of `section`. Unknown sections have none.
    fn section_subjects(
        &self,
        section: &SectionId,
    ) -> impl Future<Output = Result<BTreeSet<SubjectId>, PersistenceError>> + Send;

    fn section_exists(&self, section: &SectionId) -> impl Future<Output = Result<bool, PersistenceError>> + Send;

    fn subject_exists(&self, subject: &SubjectId) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}

/// Committed enrollments.
pub trait EnrollmentReader: Send + Sync {
    fn enrolled_subjects(
        &self,
        student: &UserId,
    ) -> impl Future<Output = Result<BTreeSet<SubjectId>, PersistenceError>> + Send;
}

/// Committed users.
pub trait UserReader: Send + Sync {
    fn find_user(&self, id: &UserId) -> impl Future<Output = Result<Option<User>, PersistenceError>> + Send;

    /// Students assigned to `section`, soft-deleted ones included.
    fn students_in_section(
        &self,
        section: &SectionId,
    ) -> impl Future<Output = Result<Vec<User>, PersistenceError>> + Send;

    /// Every user, soft-deleted ones included, ordered by id.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, PersistenceError>> + Send;
}

/// A store able to apply a [`Changeset`] atomically.
pub trait Store: Catalog + EnrollmentReader + UserReader + 'static {
    /// Applies every write in `changes` or none of them.
    ///
    /// Inserting an existing enrollment or removing a missing one is not an error.
    fn commit(&self, changes: Changeset) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}

/// Everything the enrollment logic reads.
pub trait SchoolReader: Catalog + EnrollmentReader + UserReader + 'static {}

impl<T: Catalog + EnrollmentReader + UserReader + 'static> SchoolReader for T {}
