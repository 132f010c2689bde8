#![allow(dead_code, unreachable_pub)]

use lyceum_kernel::domain::{Role, Section, SectionId, Subject, SubjectId, User, UserId};
use lyceum_kernel::{
    Catalog, Changeset, EnrollmentReader, MemoryStore, PersistenceError, Store, UserReader,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// 10-A teaches MATH and ENGL, 10-B teaches MATH and SCI, 11-A has no subjects.
pub async fn school() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    let mut changes = Changeset::new();
    for (key, name) in [("10-A", "Grade 10 A"), ("10-B", "Grade 10 B"), ("11-A", "Grade 11 A")] {
        changes.put_section(Section { id: key.into(), name: name.to_owned() });
    }
    for (key, title) in [("MATH", "Mathematics"), ("ENGL", "English"), ("SCI", "Science")] {
        changes.put_subject(Subject { id: key.into(), title: title.to_owned() });
    }
    for (section, subject) in [("10-A", "MATH"), ("10-A", "ENGL"), ("10-B", "MATH"), ("10-B", "SCI")] {
        changes.attach(section.into(), subject.into());
    }
    store.commit(changes).await.expect("seed school");
    Arc::new(store)
}

pub fn user(id: &str, role: Role, section: Option<&str>) -> User {
    User {
        id: id.into(),
        name: id.to_owned(),
        email: format!("{id}@school.test"),
        role,
        section: section.map(SectionId::from),
        deleted: false,
    }
}

pub fn student(id: &str, section: Option<&str>) -> User {
    user(id, Role::Student, section)
}

pub fn subjects(keys: &[&str]) -> BTreeSet<SubjectId> {
    keys.iter().copied().map(SubjectId::from).collect()
}

pub async fn enrolled(store: &MemoryStore, id: &str) -> BTreeSet<SubjectId> {
    store.enrolled_subjects(&UserId::from(id)).await.expect("read enrollments")
}

/// Commits `user` on its own, without running any hook.
pub async fn insert(store: &MemoryStore, user: &User) {
    let mut changes = Changeset::new();
    changes.put_user(user.clone());
    store.commit(changes).await.expect("insert user");
}

/// A store whose catalog is unreachable.
#[derive(Debug, Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
}

impl Catalog for FaultyStore {
    async fn section_subjects(&self, _: &SectionId) -> Result<BTreeSet<SubjectId>, PersistenceError> {
        Err(PersistenceError::unavailable("catalog offline"))
    }

    async fn section_exists(&self, section: &SectionId) -> Result<bool, PersistenceError> {
        self.inner.section_exists(section).await
    }

    async fn subject_exists(&self, subject: &SubjectId) -> Result<bool, PersistenceError> {
        self.inner.subject_exists(subject).await
    }
}

impl EnrollmentReader for FaultyStore {
    async fn enrolled_subjects(&self, student: &UserId) -> Result<BTreeSet<SubjectId>, PersistenceError> {
        self.inner.enrolled_subjects(student).await
    }
}

impl UserReader for FaultyStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        self.inner.find_user(id).await
    }

    async fn students_in_section(&self, section: &SectionId) -> Result<Vec<User>, PersistenceError> {
        self.inner.students_in_section(section).await
    }

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
        self.inner.list_users().await
    }
}
