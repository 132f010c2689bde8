//! # Domain Models
//!
//! Pure school types with a single dependency (`serde`): identifiers, roles,
//! users, sections, subjects, enrollments and the lifecycle events exchanged
//! between the directory and its hooks. No I/O lives here.

pub mod config;
pub mod constants;
pub mod events;
pub mod ids;
pub mod role;
pub mod school;
pub mod user;

pub use ids::{SectionId, SubjectId, UserId};
pub use role::{ParseRoleError, Role};
pub use school::{CurriculumLink, Enrollment, Section, Subject};
pub use user::{NewUser, User, UserPatch};
