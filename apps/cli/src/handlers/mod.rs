pub mod catalog;
pub mod demo;
pub mod reconcile;
pub mod users;

use lyceum::domain::{SubjectId, User};

/// `MATH, SCI`, or `-` for nothing.
pub(crate) fn subject_list<'a>(subjects: impl IntoIterator<Item = &'a SubjectId>) -> String {
    let joined = subjects.into_iter().map(SubjectId::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() { "-".to_owned() } else { joined }
}

pub(crate) fn describe(user: &User) -> String {
    let section = user.section.as_ref().map_or("-", |s| s.as_str());
    let deleted = if user.deleted { " (deleted)" } else { "" };
    format!("{} {} <{}> {} section={section}{deleted}", user.id, user.name, user.email, user.role)
}
