use crate::ids::{SectionId, UserId};
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// A person known to the school.
///
/// Only students carry a meaningful `section`; see [`User::effective_section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub section: Option<SectionId>,
    #[serde(default)]
    pub deleted: bool,
}

impl User {
    #[must_use]
    pub const fn is_student(&self) -> bool {
        self.role.is_student()
    }

    /// The section whose subjects this user must be enrolled in.
    ///
    /// `None` for every non-student role, whatever `section` holds.
    #[must_use]
    pub fn effective_section(&self) -> Option<&SectionId> {
        if self.is_student() { self.section.as_ref() } else { None }
    }
}

/// Input for creating a user. The id is assigned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub section: Option<SectionId>,
}

impl NewUser {
    pub fn student(name: impl Into<String>, email: impl Into<String>, section: Option<SectionId>) -> Self {
        Self { name: name.into(), email: email.into(), role: Role::Student, section }
    }
}

/// Partial update of a user. `None` leaves the field as is; `section: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub section: Option<Option<SectionId>>,
}

impl UserPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.section.is_none()
    }

    /// Applies the patch on a copy of `user`.
    #[must_use]
    pub fn apply(&self, user: &User) -> User {
        let mut next = user.clone();
        if let Some(name) = &self.name {
            next.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            next.email.clone_from(email);
        }
        if let Some(role) = self.role {
            next.role = role;
        }
        if let Some(section) = &self.section {
            next.section.clone_from(section);
        }
        next
    }
}
