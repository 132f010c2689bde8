//! Lifecycle events published by the directory.
//!
//! Each event carries full snapshots so hooks never have to read back the
//! record that is being written.

use crate::ids::{SectionId, SubjectId};
use crate::user::User;

/// A user was inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreated {
    pub user: User,
}

/// A user was modified. `before` is the stored state, `after` the pending one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdated {
    pub before: User,
    pub after: User,
}

impl UserUpdated {
    /// Whether the section the user must be enrolled in changed.
    #[must_use]
    pub fn effective_section_changed(&self) -> bool {
        self.before.effective_section() != self.after.effective_section()
    }
}

/// A user was soft-deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDeleted {
    pub user: User,
}

/// A soft-deleted user was restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRestored {
    pub user: User,
}

/// Subjects were attached to or detached from a section's curriculum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumChanged {
    pub section: SectionId,
    pub attached: Vec<SubjectId>,
    pub detached: Vec<SubjectId>,
}
