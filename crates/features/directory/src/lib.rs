//! # Directory
//!
//! Lifecycle of users, sections, subjects and curricula. Every write goes
//! through a [`Changeset`](lyceum_kernel::Changeset) that lifecycle hooks
//! registered on the [`EventBus`](lyceum_event_bus::EventBus) can extend
//! before it is committed atomically.

mod directory;
mod error;

pub use directory::Directory;
pub use error::{DirectoryError, DirectoryErrorExt};
