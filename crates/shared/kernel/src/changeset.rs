//! The unit of work of one request.
//!
//! A mutation records its entity writes here, lifecycle hooks add the
//! derived writes (enrollments), and the store commits everything at once.
//! Hooks never write to the store directly.

use lyceum_domain::{CurriculumLink, Enrollment, Section, SectionId, Subject, SubjectId, User, UserId};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Pending link change. Later writes for the same pair replace earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOp {
    Insert,
    Remove,
}

/// Normalized set of pending writes.
///
/// Users, sections and subjects are upserts keyed by id. Curriculum links and
/// enrollments keep only the last operation per pair, so enrolling then
/// unenrolling the same pair in one request leaves a single removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    users: BTreeMap<UserId, User>,
    sections: BTreeMap<SectionId, Section>,
    subjects: BTreeMap<SubjectId, Subject>,
    curriculum: BTreeMap<CurriculumLink, LinkOp>,
    enrollments: BTreeMap<Enrollment, LinkOp>,
}

impl Changeset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn put_section(&mut self, section: Section) {
        self.sections.insert(section.id.clone(), section);
    }

    pub fn put_subject(&mut self, subject: Subject) {
        self.subjects.insert(subject.id.clone(), subject);
    }

    pub fn attach(&mut self, section: SectionId, subject: SubjectId) {
        self.curriculum.insert(CurriculumLink { section, subject }, LinkOp::Insert);
    }

    pub fn detach(&mut self, section: SectionId, subject: SubjectId) {
        self.curriculum.insert(CurriculumLink { section, subject }, LinkOp::Remove);
    }

    /// Records an enrollment. Returns `false` if the same enrollment was already pending.
    pub fn enroll(&mut self, student: UserId, subject: SubjectId) -> bool {
        Self::set(&mut self.enrollments, Enrollment::new(student, subject), LinkOp::Insert)
    }

    /// Records an unenrollment. Returns `false` if the same removal was already pending.
    pub fn unenroll(&mut self, student: UserId, subject: SubjectId) -> bool {
        Self::set(&mut self.enrollments, Enrollment::new(student, subject), LinkOp::Remove)
    }

    fn set<K: Ord>(map: &mut BTreeMap<K, LinkOp>, key: K, op: LinkOp) -> bool {
        match map.entry(key) {
            Entry::Occupied(mut slot) => slot.insert(op) != op,
            Entry::Vacant(slot) => {
                slot.insert(op);
                true
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.sections.is_empty()
            && self.subjects.is_empty()
            && self.curriculum.is_empty()
            && self.enrollments.is_empty()
    }

    /// Total number of pending writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
            + self.sections.len()
            + self.subjects.len()
            + self.curriculum.len()
            + self.enrollments.len()
    }

    /// Pending state of a user written by this changeset.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.values()
    }

    #[must_use]
    pub fn has_section(&self, id: &SectionId) -> bool {
        self.sections.contains_key(id)
    }

    #[must_use]
    pub fn has_subject(&self, id: &SubjectId) -> bool {
        self.subjects.contains_key(id)
    }

    pub fn attached(&self) -> impl Iterator<Item = &CurriculumLink> {
        Self::with_op(&self.curriculum, LinkOp::Insert)
    }

    pub fn detached(&self) -> impl Iterator<Item = &CurriculumLink> {
        Self::with_op(&self.curriculum, LinkOp::Remove)
    }

    pub fn enrolled(&self) -> impl Iterator<Item = &Enrollment> {
        Self::with_op(&self.enrollments, LinkOp::Insert)
    }

    pub fn unenrolled(&self) -> impl Iterator<Item = &Enrollment> {
        Self::with_op(&self.enrollments, LinkOp::Remove)
    }

    fn with_op<K>(map: &BTreeMap<K, LinkOp>, op: LinkOp) -> impl Iterator<Item = &K> {
        map.iter().filter(move |(_, pending)| **pending == op).map(|(key, _)| key)
    }
}
