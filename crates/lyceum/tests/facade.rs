use lyceum::Lyceum;
use lyceum::domain::config::DatabaseConfig;
use lyceum::domain::{NewUser, Role, SubjectId};
use lyceum::kernel::{Changeset, MemoryStore};
use std::collections::BTreeSet;
use std::sync::Arc;

async fn seed<S: lyceum::kernel::Store>(school: &Lyceum<S>) {
    let directory = school.directory();
    directory.create_section("10-A".into(), "Grade 10 A").await.unwrap();
    directory.create_subject("MATH".into(), "Mathematics").await.unwrap();
    directory.create_subject("ENGL".into(), "English").await.unwrap();
    directory.attach_subject(&"10-A".into(), &"MATH".into()).await.unwrap();
    directory.attach_subject(&"10-A".into(), &"ENGL".into()).await.unwrap();
}

#[tokio::test]
async fn reconcile_all_repairs_only_drifted_users() {
    let school = Lyceum::init(Arc::new(MemoryStore::new()));
    seed(&school).await;
    let directory = school.directory();
    let ada = directory.create_user(NewUser::student("ada", "ada@school.test", Some("10-A".into()))).await.unwrap();
    let bo = directory.create_user(NewUser::student("bo", "bo@school.test", Some("10-A".into()))).await.unwrap();

    let mut drift = Changeset::new();
    drift.unenroll(ada.id.clone(), "ENGL".into());
    directory.commit(drift).await.unwrap();

    let repaired = school.reconcile_all().await.unwrap();

    assert_eq!(repaired.len(), 1);
    assert_eq!(repaired[0].0, ada.id);
    assert_eq!(repaired[0].1.enrolled, vec![SubjectId::from("ENGL")]);
    assert!(school.reconcile_user(&bo.id).await.unwrap().is_clean());
    assert!(school.reconcile_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn connect_runs_the_same_flow_on_surrealdb() {
    let config = DatabaseConfig { database: "facade".to_owned(), ..DatabaseConfig::default() };
    let school = Lyceum::connect(&config).await.unwrap();
    seed(&school).await;

    let directory = school.directory();
    let ada = directory
        .create_user(NewUser { name: "ada".to_owned(), email: "ada@school.test".to_owned(), role: Role::Student, section: Some("10-A".into()) })
        .await
        .unwrap();

    let expected: BTreeSet<SubjectId> = ["ENGL", "MATH"].into_iter().map(SubjectId::from).collect();
    assert_eq!(directory.enrollments(&ada.id).await.unwrap(), expected);

    directory.assign_section(&ada.id, None).await.unwrap();
    assert!(directory.enrollments(&ada.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn hooks_keep_enrollments_in_step_on_surrealdb() {
    let config = DatabaseConfig { database: "hooks".to_owned(), ..DatabaseConfig::default() };
    let school = Lyceum::connect(&config).await.unwrap();
    seed(&school).await;

    let directory = school.directory();
    directory.create_section("10-B".into(), "Grade 10 B").await.unwrap();
    directory.create_subject("SCI".into(), "Science").await.unwrap();
    directory.attach_subject(&"10-B".into(), &"MATH".into()).await.unwrap();
    directory.attach_subject(&"10-B".into(), &"SCI".into()).await.unwrap();

    let ada = directory.create_user(NewUser::student("ada", "ada@school.test", Some("10-A".into()))).await.unwrap();
    let tom = directory
        .create_user(NewUser { name: "tom".to_owned(), email: "tom@school.test".to_owned(), role: Role::Teacher, section: None })
        .await
        .unwrap();
    assert!(directory.enrollments(&tom.id).await.unwrap().is_empty());

    directory.assign_section(&ada.id, Some("10-B".into())).await.unwrap();
    let subjects = |keys: &[&str]| keys.iter().copied().map(SubjectId::from).collect::<BTreeSet<_>>();
    assert_eq!(directory.enrollments(&ada.id).await.unwrap(), subjects(&["MATH", "SCI"]));

    directory.attach_subject(&"10-B".into(), &"ENGL".into()).await.unwrap();
    assert_eq!(directory.enrollments(&ada.id).await.unwrap(), subjects(&["ENGL", "MATH", "SCI"]));

    directory.detach_subject(&"10-B".into(), &"MATH".into()).await.unwrap();
    assert_eq!(directory.enrollments(&ada.id).await.unwrap(), subjects(&["ENGL", "SCI"]));

    assert!(school.reconcile_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_commit_leaves_user_unchanged_on_surrealdb() {
    let config = DatabaseConfig { database: "rejected".to_owned(), ..DatabaseConfig::default() };
    let school = Lyceum::connect(&config).await.unwrap();
    seed(&school).await;

    let directory = school.directory();
    let ada = directory.create_user(NewUser::student("ada", "ada@school.test", Some("10-A".into()))).await.unwrap();

    let mut moved = ada.clone();
    moved.section = None;
    let mut changes = Changeset::new();
    changes.put_user(moved);
    changes.unenroll(ada.id.clone(), "MATH".into());
    changes.enroll(ada.id.clone(), "ART".into());
    assert!(directory.commit(changes).await.is_err());

    assert_eq!(directory.user(&ada.id).await.unwrap().section, Some("10-A".into()));
    let expected: BTreeSet<SubjectId> = ["ENGL", "MATH"].into_iter().map(SubjectId::from).collect();
    assert_eq!(directory.enrollments(&ada.id).await.unwrap(), expected);
}
