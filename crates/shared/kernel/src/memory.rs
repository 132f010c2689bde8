//! In-process store backed by `parking_lot` locks.

use crate::changeset::Changeset;
use crate::error::PersistenceError;
use crate::store::{Catalog, EnrollmentReader, Store, UserReader};
use lyceum_domain::{CurriculumLink, Enrollment, Section, SectionId, Subject, SubjectId, User, UserId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    sections: BTreeMap<SectionId, Section>,
    subjects: BTreeMap<SubjectId, Subject>,
    curriculum: BTreeSet<CurriculumLink>,
    enrollments: BTreeSet<Enrollment>,
}

impl State {
    /// Rejects changesets whose rows point at records that exist neither in
    /// the store nor in the changeset itself.
    fn validate(&self, changes: &Changeset) -> Result<(), PersistenceError> {
        let section_known = |id: &SectionId| self.sections.contains_key(id) || changes.has_section(id);
        let subject_known = |id: &SubjectId| self.subjects.contains_key(id) || changes.has_subject(id);
        let user_known = |id: &UserId| self.users.contains_key(id) || changes.user(id).is_some();

        for user in changes.users() {
            if let Some(section) = &user.section
                && !section_known(section)
            {
                return Err(PersistenceError::rejected(format!(
                    "user '{}' references unknown section '{section}'",
                    user.id
                )));
            }
        }
        for link in changes.attached() {
            if !section_known(&link.section) || !subject_known(&link.subject) {
                return Err(PersistenceError::rejected(format!(
                    "curriculum link '{}'/'{}' references an unknown record",
                    link.section, link.subject
                )));
            }
        }
        for enrollment in changes.enrolled() {
            if !user_known(&enrollment.student) || !subject_known(&enrollment.subject) {
                return Err(PersistenceError::rejected(format!(
                    "enrollment '{}'/'{}' references an unknown record",
                    enrollment.student, enrollment.subject
                )));
            }
        }
        Ok(())
    }

    fn apply(&mut self, changes: Changeset) {
        for section in changes.sections() {
            self.sections.insert(section.id.clone(), section.clone());
        }
        for subject in changes.subjects() {
            self.subjects.insert(subject.id.clone(), subject.clone());
        }
        for user in changes.users() {
            self.users.insert(user.id.clone(), user.clone());
        }
        for link in changes.detached() {
            self.curriculum.remove(link);
        }
        for link in changes.attached() {
            self.curriculum.insert(link.clone());
        }
        for enrollment in changes.unenrolled() {
            self.enrollments.remove(enrollment);
        }
        for enrollment in changes.enrolled() {
            self.enrollments.insert(enrollment.clone());
        }
    }
}

/// A [`Store`] that keeps everything in memory.
///
/// Commits hold the write lock for validation and application, so concurrent
/// commits are serialized and a rejected changeset leaves no trace.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every committed enrollment.
    #[must_use]
    pub fn enrollments(&self) -> Vec<Enrollment> {
        self.state.read().enrollments.iter().cloned().collect()
    }
}

impl Catalog for MemoryStore {
    async fn section_subjects(&self, section: &SectionId) -> Result<BTreeSet<SubjectId>, PersistenceError> {
        Ok(self
            .state
            .read()
            .curriculum
            .iter()
            .filter(|link| &link.section == section)
            .map(|link| link.subject.clone())
            .collect())
    }

    async fn section_exists(&self, section: &SectionId) -> Result<bool, PersistenceError> {
        Ok(self.state.read().sections.contains_key(section))
    }

    async fn subject_exists(&self, subject: &SubjectId) -> Result<bool, PersistenceError> {
        Ok(self.state.read().subjects.contains_key(subject))
    }
}

impl EnrollmentReader for MemoryStore {
    async fn enrolled_subjects(&self, student: &UserId) -> Result<BTreeSet<SubjectId>, PersistenceError> {
        Ok(self
            .state
            .read()
            .enrollments
            .iter()
            .filter(|e| &e.student == student)
            .map(|e| e.subject.clone())
            .collect())
    }
}

impl UserReader for MemoryStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        Ok(self.state.read().users.get(id).cloned())
    }

    async fn students_in_section(&self, section: &SectionId) -> Result<Vec<User>, PersistenceError> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .filter(|user| user.effective_section() == Some(section))
            .cloned()
            .collect())
    }

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
        Ok(self.state.read().users.values().cloned().collect())
    }
}

impl Store for MemoryStore {
    #[instrument(skip_all, fields(writes = changes.len()))]
    async fn commit(&self, changes: Changeset) -> Result<(), PersistenceError> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut state = self.state.write();
        state.validate(&changes)?;
        state.apply(changes);
        debug!("Changeset committed");
        Ok(())
    }
}
