use crate::error::{EnrollmentError, EnrollmentErrorExt};
use lyceum_kernel::domain::{SectionId, SubjectId, User};
use lyceum_kernel::{Changeset, SchoolReader};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// What a reconciliation changed for one student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Subjects of the section the student was missing, in key order.
    pub enrolled: Vec<SubjectId>,
    /// Enrollments outside the section that were removed, in key order.
    pub unenrolled: Vec<SubjectId>,
}

impl SyncReport {
    /// `true` when the student already matched their section.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.enrolled.is_empty() && self.unenrolled.is_empty()
    }
}

/// Derives enrollment writes from section membership.
///
/// Every operation reads committed state from the store and records its
/// writes in the caller's [`Changeset`]; nothing is written directly.
pub struct EnrollmentSync<S> {
    store: Arc<S>,
}

impl<S> Clone for EnrollmentSync<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S> fmt::Debug for EnrollmentSync<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrollmentSync").finish_non_exhaustive()
    }
}

impl<S: SchoolReader> EnrollmentSync<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Enrolls `student` in every subject of their section they are not enrolled in yet.
    ///
    /// Existing enrollments are left alone. A user without an effective
    /// section (no section, or not a student) is a no-op.
    ///
    /// # Errors
    /// [`EnrollmentError::Persistence`] if the store cannot be read.
    #[instrument(skip_all, fields(student = %student.id))]
    pub async fn sync_student_subjects(&self, student: &User, changes: &mut Changeset) -> Result<(), EnrollmentError> {
        let Some(section) = student.effective_section() else {
            return Ok(());
        };

        let subjects = self.section_subjects(section).await?;
        let enrolled = self.enrolled(student).await?;

        let mut added = 0usize;
        for subject in subjects.difference(&enrolled) {
            added += usize::from(changes.enroll(student.id.clone(), subject.clone()));
        }

        debug!(%section, added, "Student subjects synced");
        Ok(())
    }

    /// Unenrolls `student` from the subjects of `section`, their previous one.
    ///
    /// Subjects that are also taught in the student's current section are
    /// kept: only `subjects(section) - subjects(current)` is removed.
    ///
    /// # Errors
    /// [`EnrollmentError::Persistence`] if the store cannot be read.
    #[instrument(skip_all, fields(student = %student.id, previous = %section))]
    pub async fn unsync_student_subjects(
        &self,
        student: &User,
        section: &SectionId,
        changes: &mut Changeset,
    ) -> Result<(), EnrollmentError> {
        let previous = self.section_subjects(section).await?;
        let current = match student.effective_section() {
            Some(current) => self.section_subjects(current).await?,
            None => BTreeSet::new(),
        };
        let enrolled = self.enrolled(student).await?;

        let mut removed = 0usize;
        for subject in previous.difference(&current).filter(|s| enrolled.contains(*s)) {
            removed += usize::from(changes.unenroll(student.id.clone(), subject.clone()));
        }

        debug!(removed, "Student subjects unsynced");
        Ok(())
    }

    /// Brings `student`'s enrollments to exactly the subjects of their effective section.
    ///
    /// # Errors
    /// [`EnrollmentError::Persistence`] if the store cannot be read.
    #[instrument(skip_all, fields(student = %student.id))]
    pub async fn reconcile_student(
        &self,
        student: &User,
        changes: &mut Changeset,
    ) -> Result<SyncReport, EnrollmentError> {
        let desired = match student.effective_section() {
            Some(section) => self.section_subjects(section).await?,
            None => BTreeSet::new(),
        };
        let enrolled = self.enrolled(student).await?;

        let report = SyncReport {
            enrolled: desired.difference(&enrolled).cloned().collect(),
            unenrolled: enrolled.difference(&desired).cloned().collect(),
        };
        for subject in &report.enrolled {
            changes.enroll(student.id.clone(), subject.clone());
        }
        for subject in &report.unenrolled {
            changes.unenroll(student.id.clone(), subject.clone());
        }

        debug!(enrolled = report.enrolled.len(), unenrolled = report.unenrolled.len(), "Student reconciled");
        Ok(report)
    }

    /// Propagates a curriculum edit of `section` to every student in it.
    ///
    /// Returns the number of students visited.
    ///
    /// # Errors
    /// [`EnrollmentError::Persistence`] if the store cannot be read.
    #[instrument(skip_all, fields(section = %section, attached = attached.len(), detached = detached.len()))]
    pub async fn apply_curriculum_change(
        &self,
        section: &SectionId,
        attached: &[SubjectId],
        detached: &[SubjectId],
        changes: &mut Changeset,
    ) -> Result<usize, EnrollmentError> {
        let students = self
            .store
            .students_in_section(section)
            .await
            .context(format!("Loading students of section {section}"))?;

        for student in &students {
            let enrolled = self.enrolled(student).await?;
            for subject in attached.iter().filter(|s| !enrolled.contains(*s)) {
                changes.enroll(student.id.clone(), subject.clone());
            }
            for subject in detached.iter().filter(|s| enrolled.contains(*s)) {
                changes.unenroll(student.id.clone(), subject.clone());
            }
        }

        debug!(students = students.len(), "Curriculum change applied");
        Ok(students.len())
    }

    async fn section_subjects(&self, section: &SectionId) -> Result<BTreeSet<SubjectId>, EnrollmentError> {
        self.store.section_subjects(section).await.context(format!("Loading subjects of section {section}"))
    }

    async fn enrolled(&self, student: &User) -> Result<BTreeSet<SubjectId>, EnrollmentError> {
        self.store
            .enrolled_subjects(&student.id)
            .await
            .context(format!("Loading enrollments of {}", student.id))
    }
}
