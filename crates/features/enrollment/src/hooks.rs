//! Lifecycle hooks wiring [`EnrollmentSync`] to the event bus.

use crate::sync::EnrollmentSync;
use lyceum_event_bus::{BoxError, BoxFuture, EventBus, Handler};
use lyceum_kernel::domain::events::{CurriculumChanged, UserCreated, UserUpdated};
use lyceum_kernel::{Changeset, SchoolReader};
use tracing::trace;

/// Enrolls a newly created student in their section's subjects.
#[derive(Debug, Clone)]
pub struct OnUserCreated<S>(pub EnrollmentSync<S>);

/// Moves a student's enrollments when their effective section changes.
#[derive(Debug, Clone)]
pub struct OnUserUpdated<S>(pub EnrollmentSync<S>);

/// Re-applies a section's curriculum edit to its students.
#[derive(Debug, Clone)]
pub struct OnCurriculumChanged<S>(pub EnrollmentSync<S>);

impl<S: SchoolReader> Handler<UserCreated, Changeset> for OnUserCreated<S> {
    fn handle<'a>(
        &'a self,
        event: &'a UserCreated,
        changes: &'a mut Changeset,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(async move {
            if event.user.effective_section().is_none() {
                trace!(user = %event.user.id, role = %event.user.role, "No section to sync");
                return Ok(());
            }
            self.0.sync_student_subjects(&event.user, changes).await?;
            Ok(())
        })
    }
}

impl<S: SchoolReader> Handler<UserUpdated, Changeset> for OnUserUpdated<S> {
    fn handle<'a>(
        &'a self,
        event: &'a UserUpdated,
        changes: &'a mut Changeset,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(async move {
            if !event.effective_section_changed() {
                return Ok(());
            }
            if let Some(previous) = event.before.effective_section() {
                self.0.unsync_student_subjects(&event.after, previous, changes).await?;
            }
            self.0.sync_student_subjects(&event.after, changes).await?;
            Ok(())
        })
    }
}

impl<S: SchoolReader> Handler<CurriculumChanged, Changeset> for OnCurriculumChanged<S> {
    fn handle<'a>(
        &'a self,
        event: &'a CurriculumChanged,
        changes: &'a mut Changeset,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(async move {
            self.0.apply_curriculum_change(&event.section, &event.attached, &event.detached, changes).await?;
            Ok(())
        })
    }
}

/// Subscribes the enrollment hooks on `bus`.
pub fn register<S: SchoolReader>(bus: &EventBus<Changeset>, sync: &EnrollmentSync<S>) {
    bus.subscribe::<UserCreated, _>(OnUserCreated(sync.clone()));
    bus.subscribe::<UserUpdated, _>(OnUserUpdated(sync.clone()));
    bus.subscribe::<CurriculumChanged, _>(OnCurriculumChanged(sync.clone()));
}
