//! [`Store`] implementation on top of `SurrealDB`.

use crate::Database;
use crate::error::{DatabaseError, DatabaseErrorExt};
use lyceum_kernel::domain::{CurriculumLink, Enrollment, Role, Section, SectionId, Subject, SubjectId, User, UserId};
use lyceum_kernel::{Catalog, Changeset, EnrollmentReader, PersistenceError, Store, UserReader};
use std::collections::BTreeSet;
use surrealdb::types::SurrealValue;
use tracing::{debug, instrument};

const USER_FIELDS: &str = "key, name, email, role, section, deleted";

/// Applies a whole changeset in one transaction. Any `THROW` rolls everything back.
const COMMIT: &str = "
BEGIN TRANSACTION;
FOR $row IN $sections {
    DELETE section WHERE key = $row.key;
    CREATE section CONTENT $row;
};
FOR $row IN $subjects {
    DELETE subject WHERE key = $row.key;
    CREATE subject CONTENT $row;
};
FOR $row IN $users {
    IF $row.section != NONE AND (SELECT VALUE key FROM section WHERE key = $row.section).is_empty() {
        THROW 'user ' + $row.key + ' references unknown section ' + $row.section;
    };
    DELETE user WHERE key = $row.key;
    CREATE user CONTENT $row;
};
FOR $row IN $detach {
    DELETE curriculum WHERE section = $row.section AND subject = $row.subject;
};
FOR $row IN $attach {
    IF (SELECT VALUE key FROM section WHERE key = $row.section).is_empty()
        OR (SELECT VALUE key FROM subject WHERE key = $row.subject).is_empty() {
        THROW 'curriculum link ' + $row.section + '/' + $row.subject + ' references an unknown record';
    };
    IF (SELECT VALUE subject FROM curriculum WHERE section = $row.section AND subject = $row.subject).is_empty() {
        CREATE curriculum CONTENT $row;
    };
};
FOR $row IN $unenroll {
    DELETE enrollment WHERE student = $row.student AND subject = $row.subject;
};
FOR $row IN $enroll {
    IF (SELECT VALUE key FROM user WHERE key = $row.student).is_empty()
        OR (SELECT VALUE key FROM subject WHERE key = $row.subject).is_empty() {
        THROW 'enrollment ' + $row.student + '/' + $row.subject + ' references an unknown record';
    };
    IF (SELECT VALUE subject FROM enrollment WHERE student = $row.student AND subject = $row.subject).is_empty() {
        CREATE enrollment CONTENT $row;
    };
};
COMMIT TRANSACTION;
";

#[derive(Debug, Clone, SurrealValue)]
struct UserRow {
    key: String,
    name: String,
    email: String,
    role: String,
    section: Option<String>,
    deleted: bool,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            key: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_owned(),
            section: user.section.as_ref().map(ToString::to_string),
            deleted: user.deleted,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|e| DatabaseError::Internal {
            message: e.to_string().into(),
            context: Some(format!("Decoding user {}", row.key).into()),
        })?;
        Ok(Self {
            id: row.key.into(),
            name: row.name,
            email: row.email,
            role,
            section: row.section.map(SectionId::from),
            deleted: row.deleted,
        })
    }
}

#[derive(Debug, Clone, SurrealValue)]
struct SectionRow {
    key: String,
    name: String,
}

impl From<&Section> for SectionRow {
    fn from(section: &Section) -> Self {
        Self { key: section.id.to_string(), name: section.name.clone() }
    }
}

#[derive(Debug, Clone, SurrealValue)]
struct SubjectRow {
    key: String,
    title: String,
}

impl From<&Subject> for SubjectRow {
    fn from(subject: &Subject) -> Self {
        Self { key: subject.id.to_string(), title: subject.title.clone() }
    }
}

#[derive(Debug, Clone, SurrealValue)]
struct LinkRow {
    section: String,
    subject: String,
}

#[derive(Debug, Clone, SurrealValue)]
struct EnrollmentRow {
    student: String,
    subject: String,
}

fn link_rows<'a>(links: impl Iterator<Item = &'a CurriculumLink>) -> Vec<LinkRow> {
    links.map(|l| LinkRow { section: l.section.to_string(), subject: l.subject.to_string() }).collect()
}

fn enrollment_rows<'a>(enrollments: impl Iterator<Item = &'a Enrollment>) -> Vec<EnrollmentRow> {
    enrollments.map(|e| EnrollmentRow { student: e.student.to_string(), subject: e.subject.to_string() }).collect()
}

/// A [`Store`] persisting to `SurrealDB`.
#[derive(Debug, Clone)]
pub struct SurrealStore {
    db: Database,
}

impl SurrealStore {
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    async fn users_where(
        &self,
        filter: &str,
        bind: Option<(&'static str, String)>,
    ) -> Result<Vec<User>, DatabaseError> {
        let query = format!("SELECT {USER_FIELDS} FROM user {filter} ORDER BY key");
        let request = self.db.query(&query);
        let request = match bind {
            Some(pair) => request.bind(pair),
            None => request,
        };
        request
            .await
            .context("Loading users")?
            .take::<Vec<UserRow>>(0)
            .context("Parsing users")?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn keys(&self, query: &'static str, key: String) -> Result<Vec<String>, DatabaseError> {
        Ok(self.db.query(query).bind(("key", key)).await.context(query)?.take::<Vec<String>>(0)?)
    }
}

impl Catalog for SurrealStore {
    async fn section_subjects(&self, section: &SectionId) -> Result<BTreeSet<SubjectId>, PersistenceError> {
        let subjects = self
            .keys("SELECT VALUE subject FROM curriculum WHERE section = $key", section.to_string())
            .await?;
        Ok(subjects.into_iter().map(SubjectId::from).collect())
    }

    async fn section_exists(&self, section: &SectionId) -> Result<bool, PersistenceError> {
        let found = self.keys("SELECT VALUE key FROM section WHERE key = $key", section.to_string()).await?;
        Ok(!found.is_empty())
    }

    async fn subject_exists(&self, subject: &SubjectId) -> Result<bool, PersistenceError> {
        let found = self.keys("SELECT VALUE key FROM subject WHERE key = $key", subject.to_string()).await?;
        Ok(!found.is_empty())
    }
}

impl EnrollmentReader for SurrealStore {
    async fn enrolled_subjects(&self, student: &UserId) -> Result<BTreeSet<SubjectId>, PersistenceError> {
        let subjects = self
            .keys("SELECT VALUE subject FROM enrollment WHERE student = $key", student.to_string())
            .await?;
        Ok(subjects.into_iter().map(SubjectId::from).collect())
    }
}

impl UserReader for SurrealStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        let mut users = self.users_where("WHERE key = $key", Some(("key", id.to_string()))).await?;
        Ok(users.pop())
    }

    async fn students_in_section(&self, section: &SectionId) -> Result<Vec<User>, PersistenceError> {
        Ok(self
            .users_where("WHERE role = 'student' AND section = $key", Some(("key", section.to_string())))
            .await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
        Ok(self.users_where("", None).await?)
    }
}

impl Store for SurrealStore {
    #[instrument(skip_all, fields(writes = changes.len()))]
    async fn commit(&self, changes: Changeset) -> Result<(), PersistenceError> {
        if changes.is_empty() {
            return Ok(());
        }

        let users: Vec<UserRow> = changes.users().map(UserRow::from).collect();
        let sections: Vec<SectionRow> = changes.sections().map(SectionRow::from).collect();
        let subjects: Vec<SubjectRow> = changes.subjects().map(SubjectRow::from).collect();
        let response = self
            .db
            .query(COMMIT)
            .bind(("users", users))
            .bind(("sections", sections))
            .bind(("subjects", subjects))
            .bind(("attach", link_rows(changes.attached())))
            .bind(("detach", link_rows(changes.detached())))
            .bind(("enroll", enrollment_rows(changes.enrolled())))
            .bind(("unenroll", enrollment_rows(changes.unenrolled())))
            .await
            .map_err(|e| PersistenceError::unavailable(e.to_string()))?;

        response.check().map_err(|e| PersistenceError::rejected(e.to_string()))?;
        debug!("Changeset committed");
        Ok(())
    }
}
