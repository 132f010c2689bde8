use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::{FxHashMap, hash64};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

#[derive(Debug)]
pub(crate) struct Migration {
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    pub(crate) fn checksum(&self) -> String {
        format!("{:016x}", hash64(self.script.as_bytes()))
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration { version: self.version.to_owned(), checksum: self.checksum() }
    }
}

/// Schema scripts, applied in order.
pub(crate) const MIGRATIONS: &[Migration] =
    &[Migration { version: "0001_school", script: include_str!("../migrations/0001_school.surql") }];

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, Clone, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        self.run_with(MIGRATIONS).await
    }

    pub(crate) async fn run_with(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied_migrations = self.applied_migrations().await?;

        for migration in migrations {
            if let Some(applied) = applied_migrations.get(migration.version) {
                ensure_checksum_match(migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ version: $version, checksum: $checksum }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .context(format!("SQL execution failed at {}", migration.version))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Migration {} rejected", migration.version))?;

        Ok(())
    }

    async fn applied_migrations(&self) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query(
                "DEFINE TABLE IF NOT EXISTS migration SCHEMALESS;
                SELECT version, checksum FROM migration;",
            )
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(1)
            .context("Parsing migrations map")?;

        Ok(entries.into_iter().map(|entry| (entry.version.clone(), entry)).collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let expected = migration.checksum();
    if existing != expected {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (recorded {existing}, current {expected})",
                migration.version
            )
            .into(),
            context: Some("Migration already applied with different contents".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_stable_and_content_sensitive() {
        let a = Migration { version: "x", script: "DEFINE TABLE a;" };
        let b = Migration { version: "x", script: "DEFINE TABLE b;" };

        assert_eq!(a.checksum(), a.checksum());
        assert_eq!(a.checksum().len(), 16);
        assert_ne!(a.checksum(), b.checksum());
    }

    #[test]
    fn mismatch_is_reported() {
        let migration = Migration { version: "0001", script: "DEFINE TABLE a;" };
        assert!(ensure_checksum_match(&migration, &migration.checksum()).is_ok());
        assert!(matches!(
            ensure_checksum_match(&migration, "0000000000000000"),
            Err(DatabaseError::Migration { .. })
        ));
    }
}
