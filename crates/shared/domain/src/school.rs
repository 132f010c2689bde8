use crate::ids::{SectionId, SubjectId, UserId};
use serde::{Deserialize, Serialize};

/// A grouping of students sharing one curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
}

/// A course students can be enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub title: String,
}

/// Membership of a subject in a section's curriculum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurriculumLink {
    pub section: SectionId,
    pub subject: SubjectId,
}

/// A student enrolled in a subject.
///
/// Enrollments are derived from section membership and carry no other data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    pub student: UserId,
    pub subject: SubjectId,
}

impl Enrollment {
    pub const fn new(student: UserId, subject: SubjectId) -> Self {
        Self { student, subject }
    }
}
