use lyceum_database::*;
use lyceum_kernel::domain::config::DatabaseConfig;
use lyceum_kernel::domain::{Role, Section, Subject, User};
use lyceum_kernel::{Catalog, Changeset, EnrollmentReader, PersistenceError, Store, UserReader};
use std::collections::BTreeSet;

async fn store(db: &str) -> SurrealStore {
    let db = Database::builder().url("mem://").session("lyceum_test", db).init().await.expect("connect to mem://");
    SurrealStore::new(db)
}

fn student(id: &str, section: Option<&str>) -> User {
    User {
        id: id.into(),
        name: id.to_owned(),
        email: format!("{id}@school.test"),
        role: Role::Student,
        section: section.map(Into::into),
        deleted: false,
    }
}

fn catalog() -> Changeset {
    let mut changes = Changeset::new();
    changes.put_section(Section { id: "10-A".into(), name: "Grade 10 A".to_owned() });
    for key in ["MATH", "ENGL"] {
        changes.put_subject(Subject { id: key.into(), title: key.to_lowercase() });
        changes.attach("10-A".into(), key.into());
    }
    changes
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder().url("mem://").session("test_ns", "test_db").init().await.expect("connect to mem://");

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn builder_accepts_config_defaults() {
    let config = DatabaseConfig { database: "from_config".to_owned(), ..DatabaseConfig::default() };
    let db = DatabaseBuilder::from_config(&config).init().await.expect("connect from config");
    assert_eq!(db.namespace(), "lyceum");
    assert_eq!(db.database(), "from_config");
}

#[tokio::test]
async fn commit_round_trips_through_readers() {
    let store = store("round_trip").await;
    store.commit(catalog()).await.unwrap();

    let mut changes = Changeset::new();
    changes.put_user(student("s1", Some("10-A")));
    changes.put_user(User { role: Role::Teacher, ..student("t1", None) });
    changes.enroll("s1".into(), "MATH".into());
    changes.enroll("s1".into(), "ENGL".into());
    store.commit(changes).await.unwrap();

    assert!(store.section_exists(&"10-A".into()).await.unwrap());
    assert!(!store.section_exists(&"10-B".into()).await.unwrap());
    assert!(store.subject_exists(&"MATH".into()).await.unwrap());
    assert_eq!(
        store.section_subjects(&"10-A".into()).await.unwrap(),
        BTreeSet::from(["ENGL".into(), "MATH".into()])
    );
    assert_eq!(store.enrolled_subjects(&"s1".into()).await.unwrap().len(), 2);
    assert_eq!(store.find_user(&"s1".into()).await.unwrap(), Some(student("s1", Some("10-A"))));
    assert_eq!(store.students_in_section(&"10-A".into()).await.unwrap().len(), 1);
    assert_eq!(store.list_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn repeated_enrollment_creates_one_row() {
    let store = store("idempotent").await;
    store.commit(catalog()).await.unwrap();

    for _ in 0..2 {
        let mut changes = Changeset::new();
        changes.put_user(student("s1", Some("10-A")));
        changes.enroll("s1".into(), "MATH".into());
        store.commit(changes).await.unwrap();
    }

    let rows: Vec<String> = store
        .db()
        .query("SELECT VALUE subject FROM enrollment WHERE student = 's1'")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert_eq!(rows, ["MATH"]);
}

#[tokio::test]
async fn dangling_enrollment_rolls_back_everything() {
    let store = store("rollback").await;
    store.commit(catalog()).await.unwrap();

    let mut changes = Changeset::new();
    changes.put_user(student("s1", Some("10-A")));
    changes.enroll("s1".into(), "ART".into());

    let err = store.commit(changes).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Rejected { .. }), "got {err}");
    assert!(store.find_user(&"s1".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn unenroll_and_detach_remove_rows() {
    let store = store("removal").await;
    store.commit(catalog()).await.unwrap();

    let mut changes = Changeset::new();
    changes.put_user(student("s1", Some("10-A")));
    changes.enroll("s1".into(), "MATH".into());
    store.commit(changes).await.unwrap();

    let mut changes = Changeset::new();
    changes.unenroll("s1".into(), "MATH".into());
    changes.detach("10-A".into(), "ENGL".into());
    store.commit(changes).await.unwrap();

    assert!(store.enrolled_subjects(&"s1".into()).await.unwrap().is_empty());
    assert_eq!(store.section_subjects(&"10-A".into()).await.unwrap(), BTreeSet::from(["MATH".into()]));
}
