use crate::error::{DirectoryError, DirectoryErrorExt};
use lyceum_event_bus::{Event, EventBus};
use lyceum_kernel::domain::events::{CurriculumChanged, UserCreated, UserDeleted, UserRestored, UserUpdated};
use lyceum_kernel::domain::{NewUser, Section, SectionId, Subject, SubjectId, User, UserId, UserPatch};
use lyceum_kernel::{Changeset, Store, safe_nanoid};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Entry point for every write to users, sections and subjects.
///
/// Each mutation records the entity write in a fresh [`Changeset`],
/// dispatches the matching lifecycle event so hooks can add their own
/// writes, and commits the result in one step. A hook error or a rejected
/// commit leaves the store untouched.
pub struct Directory<S> {
    store: Arc<S>,
    bus: EventBus<Changeset>,
}

impl<S> Clone for Directory<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), bus: self.bus.clone() }
    }
}

impl<S> fmt::Debug for Directory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory").field("bus", &self.bus).finish_non_exhaustive()
    }
}

impl<S: Store> Directory<S> {
    pub const fn new(store: Arc<S>, bus: EventBus<Changeset>) -> Self {
        Self { store, bus }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    #[must_use]
    pub const fn bus(&self) -> &EventBus<Changeset> {
        &self.bus
    }

    /// Creates a user with a fresh id.
    ///
    /// # Errors
    /// [`DirectoryError::Validation`] for a blank name, a section on a
    /// non-student or an unknown section; hook and store failures otherwise.
    #[instrument(skip_all, fields(role = %input.role))]
    pub async fn create_user(&self, input: NewUser) -> Result<User, DirectoryError> {
        let user = User {
            id: UserId::new(safe_nanoid!()),
            name: input.name.trim().to_owned(),
            email: input.email.trim().to_owned(),
            role: input.role,
            section: input.section,
            deleted: false,
        };
        self.validate_user(&user).await?;

        let mut changes = Changeset::new();
        changes.put_user(user.clone());
        self.publish(&UserCreated { user: user.clone() }, changes).await?;

        info!(user = %user.id, "User created");
        Ok(user)
    }

    /// Applies `patch` to a live user.
    ///
    /// A user that stops being a student loses its section, unless the same
    /// patch assigns one, which is rejected.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown id, [`DirectoryError::Validation`]
    /// for a deleted user or an invalid result; hook and store failures otherwise.
    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, DirectoryError> {
        let before = self.user(id).await?;
        if before.deleted {
            return Err(DirectoryError::validation(format!("user '{id}' is deleted")));
        }

        let mut after = patch.apply(&before);
        after.name = after.name.trim().to_owned();
        after.email = after.email.trim().to_owned();
        let demoted = before.role.is_student() && !after.role.is_student();
        if demoted && patch.section.is_none() && after.section.take().is_some() {
            debug!(role = %after.role, "Section dropped with the student role");
        }
        self.validate_user(&after).await?;

        if after == before {
            debug!("Nothing to update");
            return Ok(after);
        }

        let mut changes = Changeset::new();
        changes.put_user(after.clone());
        self.publish(&UserUpdated { before, after: after.clone() }, changes).await?;

        info!("User updated");
        Ok(after)
    }

    /// Moves a student to `section`, or out of any section with `None`.
    ///
    /// # Errors
    /// See [`Directory::update_user`]; additionally a non-student cannot be assigned.
    pub async fn assign_section(&self, id: &UserId, section: Option<SectionId>) -> Result<User, DirectoryError> {
        self.update_user(id, UserPatch { section: Some(section), ..UserPatch::default() }).await
    }

    /// Soft-deletes a user. Deleting a deleted user is a no-op.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown id; hook and store failures otherwise.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &UserId) -> Result<User, DirectoryError> {
        let mut user = self.user(id).await?;
        if user.deleted {
            return Ok(user);
        }
        user.deleted = true;

        let mut changes = Changeset::new();
        changes.put_user(user.clone());
        self.publish(&UserDeleted { user: user.clone() }, changes).await?;

        info!("User deleted");
        Ok(user)
    }

    /// Restores a soft-deleted user. Restoring a live user is a no-op.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown id; hook and store failures otherwise.
    #[instrument(skip(self))]
    pub async fn restore_user(&self, id: &UserId) -> Result<User, DirectoryError> {
        let mut user = self.user(id).await?;
        if !user.deleted {
            return Ok(user);
        }
        user.deleted = false;

        let mut changes = Changeset::new();
        changes.put_user(user.clone());
        self.publish(&UserRestored { user: user.clone() }, changes).await?;

        info!("User restored");
        Ok(user)
    }

    /// Loads a user, deleted or not.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown id.
    pub async fn user(&self, id: &UserId) -> Result<User, DirectoryError> {
        self.store
            .find_user(id)
            .await
            .context("Loading user")?
            .ok_or_else(|| DirectoryError::not_found(format!("user '{id}'")))
    }

    /// Subjects `id` is enrolled in.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown id.
    pub async fn enrollments(&self, id: &UserId) -> Result<BTreeSet<SubjectId>, DirectoryError> {
        let user = self.user(id).await?;
        Ok(self.store.enrolled_subjects(&user.id).await.context("Loading enrollments")?)
    }

    /// Every stored user, deleted ones included.
    ///
    /// # Errors
    /// Store failures.
    pub async fn users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.store.list_users().await.context("Listing users")?)
    }

    /// Subjects in the curriculum of `section`.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown section.
    pub async fn curriculum(&self, section: &SectionId) -> Result<BTreeSet<SubjectId>, DirectoryError> {
        self.ensure_section(section).await?;
        Ok(self.store.section_subjects(section).await.context("Loading curriculum")?)
    }

    /// Creates a section with an empty curriculum.
    ///
    /// # Errors
    /// [`DirectoryError::Validation`] for a blank or taken key.
    #[instrument(skip(self, name))]
    pub async fn create_section(&self, id: SectionId, name: impl Into<String>) -> Result<Section, DirectoryError> {
        ensure_key(id.as_str(), "section")?;
        if self.store.section_exists(&id).await.context("Checking section key")? {
            return Err(DirectoryError::validation(format!("section '{id}' already exists")));
        }

        let section = Section { id, name: name.into() };
        let mut changes = Changeset::new();
        changes.put_section(section.clone());
        self.store.commit(changes).await.context("Committing section")?;

        info!("Section created");
        Ok(section)
    }

    /// Creates a subject.
    ///
    /// # Errors
    /// [`DirectoryError::Validation`] for a blank or taken key.
    #[instrument(skip(self, title))]
    pub async fn create_subject(&self, id: SubjectId, title: impl Into<String>) -> Result<Subject, DirectoryError> {
        ensure_key(id.as_str(), "subject")?;
        if self.store.subject_exists(&id).await.context("Checking subject key")? {
            return Err(DirectoryError::validation(format!("subject '{id}' already exists")));
        }

        let subject = Subject { id, title: title.into() };
        let mut changes = Changeset::new();
        changes.put_subject(subject.clone());
        self.store.commit(changes).await.context("Committing subject")?;

        info!("Subject created");
        Ok(subject)
    }

    /// Adds `subject` to the curriculum of `section`.
    ///
    /// Returns `false` when it was already part of it.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown section or subject; hook and
    /// store failures otherwise.
    #[instrument(skip(self))]
    pub async fn attach_subject(&self, section: &SectionId, subject: &SubjectId) -> Result<bool, DirectoryError> {
        if self.curriculum(section).await?.contains(subject) {
            return Ok(false);
        }
        self.ensure_subject(subject).await?;

        let mut changes = Changeset::new();
        changes.attach(section.clone(), subject.clone());
        let event = CurriculumChanged { section: section.clone(), attached: vec![subject.clone()], detached: vec![] };
        self.publish(&event, changes).await?;

        info!("Subject attached");
        Ok(true)
    }

    /// Removes `subject` from the curriculum of `section`.
    ///
    /// Returns `false` when it was not part of it.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown section; hook and store failures otherwise.
    #[instrument(skip(self))]
    pub async fn detach_subject(&self, section: &SectionId, subject: &SubjectId) -> Result<bool, DirectoryError> {
        if !self.curriculum(section).await?.contains(subject) {
            return Ok(false);
        }

        let mut changes = Changeset::new();
        changes.detach(section.clone(), subject.clone());
        let event = CurriculumChanged { section: section.clone(), attached: vec![], detached: vec![subject.clone()] };
        self.publish(&event, changes).await?;

        info!("Subject detached");
        Ok(true)
    }

    /// Commits a changeset prepared outside the lifecycle events, e.g. a repair.
    ///
    /// # Errors
    /// Store failures.
    pub async fn commit(&self, changes: Changeset) -> Result<(), DirectoryError> {
        Ok(self.store.commit(changes).await.context("Committing changeset")?)
    }

    /// Runs the hooks for `event` on `changes`, then commits them.
    async fn publish<E: Event>(&self, event: &E, mut changes: Changeset) -> Result<(), DirectoryError> {
        let hooks = self.bus.dispatch(event, &mut changes).await.context(std::any::type_name::<E>())?;
        debug!(hooks, writes = changes.len(), "Hooks ran");
        self.store.commit(changes).await.context("Committing changeset")?;
        Ok(())
    }

    async fn validate_user(&self, user: &User) -> Result<(), DirectoryError> {
        if user.name.is_empty() {
            return Err(DirectoryError::validation("user name cannot be empty"));
        }
        if !user.email.contains('@') {
            return Err(DirectoryError::validation(format!("'{}' is not an email address", user.email)));
        }
        let Some(section) = &user.section else {
            return Ok(());
        };
        if !user.role.is_student() {
            return Err(DirectoryError::validation(format!(
                "only students can be assigned to a section, not a {}",
                user.role
            )));
        }
        if !self.store.section_exists(section).await.context("Checking section")? {
            return Err(DirectoryError::validation(format!("unknown section '{section}'")));
        }
        Ok(())
    }

    async fn ensure_section(&self, section: &SectionId) -> Result<(), DirectoryError> {
        if self.store.section_exists(section).await.context("Checking section")? {
            Ok(())
        } else {
            Err(DirectoryError::not_found(format!("section '{section}'")))
        }
    }

    async fn ensure_subject(&self, subject: &SubjectId) -> Result<(), DirectoryError> {
        if self.store.subject_exists(subject).await.context("Checking subject")? {
            Ok(())
        } else {
            Err(DirectoryError::not_found(format!("subject '{subject}'")))
        }
    }
}

fn ensure_key(key: &str, kind: &str) -> Result<(), DirectoryError> {
    if key.trim().is_empty() || key.chars().any(char::is_whitespace) {
        return Err(DirectoryError::validation(format!("invalid {kind} key '{key}'")));
    }
    Ok(())
}
