//! Facade crate for the Lyceum school core.
//! Re-exports domain/kernel primitives and wires the feature crates together.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), lyceum::LyceumError> {
//! use lyceum::Lyceum;
//! use lyceum::kernel::MemoryStore;
//! use std::sync::Arc;
//!
//! let school = Lyceum::init(Arc::new(MemoryStore::new()));
//! school.directory().create_section("10-A".into(), "Grade 10 A").await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::{LyceumError, LyceumErrorExt};
pub use lyceum_database as database;
pub use lyceum_directory as directory;
pub use lyceum_domain as domain;
pub use lyceum_enrollment as enrollment;
pub use lyceum_kernel as kernel;

use lyceum_database::{DatabaseBuilder, SurrealStore};
use lyceum_directory::Directory;
use lyceum_domain::config::DatabaseConfig;
use lyceum_domain::{User, UserId};
use lyceum_enrollment::{EnrollmentSync, SyncReport};
use lyceum_event_bus::EventBus;
use lyceum_kernel::{Changeset, Store};
use std::sync::Arc;
use tracing::{info, instrument};

/// The directory with the enrollment hooks registered, over one store.
#[derive(Debug, Clone)]
pub struct Lyceum<S> {
    directory: Directory<S>,
    enrollment: EnrollmentSync<S>,
}

impl<S: Store> Lyceum<S> {
    /// Registers every hook on a fresh bus and builds the directory on `store`.
    pub fn init(store: Arc<S>) -> Self {
        let bus = EventBus::new();
        let enrollment = EnrollmentSync::new(Arc::clone(&store));
        lyceum_enrollment::register(&bus, &enrollment);
        info!(hooks = ?bus, "Lyceum initialized");

        Self { directory: Directory::new(store, bus), enrollment }
    }

    #[must_use]
    pub const fn directory(&self) -> &Directory<S> {
        &self.directory
    }

    #[must_use]
    pub const fn enrollment(&self) -> &EnrollmentSync<S> {
        &self.enrollment
    }

    /// Repairs one user's enrollments and commits the fix.
    ///
    /// # Errors
    /// Unknown user, store failures.
    pub async fn reconcile_user(&self, id: &UserId) -> Result<SyncReport, LyceumError> {
        let user = self.directory.user(id).await?;
        self.reconcile(&user).await
    }

    /// Repairs every user's enrollments, one commit per user that drifted.
    ///
    /// Returns the users that needed changes.
    ///
    /// # Errors
    /// Stops at the first store failure; users repaired before it stay repaired.
    #[instrument(skip(self))]
    pub async fn reconcile_all(&self) -> Result<Vec<(UserId, SyncReport)>, LyceumError> {
        let mut repaired = Vec::new();
        for user in self.directory.users().await? {
            let report = self.reconcile(&user).await?;
            if !report.is_clean() {
                repaired.push((user.id, report));
            }
        }
        info!(repaired = repaired.len(), "Reconciliation finished");
        Ok(repaired)
    }

    async fn reconcile(&self, user: &User) -> Result<SyncReport, LyceumError> {
        let mut changes = Changeset::new();
        let report = self.enrollment.reconcile_student(user, &mut changes).await?;
        self.directory.commit(changes).await?;
        Ok(report)
    }
}

impl Lyceum<SurrealStore> {
    /// Connects to `SurrealDB`, applies migrations and wires the hooks.
    ///
    /// # Errors
    /// Connection, authentication or migration failures.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, LyceumError> {
        let db = DatabaseBuilder::from_config(config).init().await.context("Opening school database")?;
        Ok(Self::init(Arc::new(SurrealStore::new(db))))
    }
}
