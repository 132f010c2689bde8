mod common;

use common::{FaultyStore, enrolled, insert, school, student, subjects, user};
use lyceum_enrollment::{EnrollmentError, EnrollmentSync, register};
use lyceum_event_bus::{EventBus, EventBusError};
use lyceum_kernel::domain::events::{CurriculumChanged, UserCreated, UserDeleted, UserUpdated};
use lyceum_kernel::domain::{Role, User};
use lyceum_kernel::{Changeset, PersistenceError, Store};
use std::sync::Arc;

fn bus_for<S: lyceum_kernel::SchoolReader>(store: Arc<S>) -> EventBus<Changeset> {
    let bus = EventBus::new();
    register(&bus, &EnrollmentSync::new(store));
    bus
}

#[tokio::test]
async fn register_subscribes_three_hooks() {
    let bus = bus_for(school().await);
    assert_eq!(bus.subscriber_count::<UserCreated>(), 1);
    assert_eq!(bus.subscriber_count::<UserUpdated>(), 1);
    assert_eq!(bus.subscriber_count::<CurriculumChanged>(), 1);
    assert_eq!(bus.subscriber_count::<UserDeleted>(), 0);
}

#[tokio::test]
async fn creating_a_student_with_section_enrolls_them() {
    let store = school().await;
    let bus = bus_for(store.clone());
    let ada = student("ada", Some("10-B"));

    let mut changes = Changeset::new();
    changes.put_user(ada.clone());
    bus.dispatch(&UserCreated { user: ada }, &mut changes).await.unwrap();
    store.commit(changes).await.unwrap();

    assert_eq!(enrolled(&store, "ada").await, subjects(&["MATH", "SCI"]));
}

#[tokio::test]
async fn non_students_and_sectionless_students_are_ignored() {
    let bus = bus_for(Arc::new(FaultyStore::default()));

    // The faulty catalog would fail any sync attempt, so success means no sync ran.
    for created in [user("tom", Role::Teacher, Some("10-A")), user("pat", Role::Parent, None), student("bo", None)] {
        let mut changes = Changeset::new();
        bus.dispatch(&UserCreated { user: created }, &mut changes).await.unwrap();
        assert!(changes.is_empty());
    }
}

#[tokio::test]
async fn update_without_section_change_is_a_no_op() {
    let bus = bus_for(Arc::new(FaultyStore::default()));
    let before = student("ada", Some("10-A"));
    let after = User { name: "Ada Lovelace".to_owned(), ..before.clone() };

    let mut changes = Changeset::new();
    bus.dispatch(&UserUpdated { before, after }, &mut changes).await.unwrap();
    assert!(changes.is_empty());
}

#[tokio::test]
async fn section_move_through_the_bus() {
    let store = school().await;
    let bus = bus_for(store.clone());
    let before = student("ada", Some("10-A"));
    let mut changes = Changeset::new();
    changes.put_user(before.clone());
    bus.dispatch(&UserCreated { user: before.clone() }, &mut changes).await.unwrap();
    store.commit(changes).await.unwrap();

    let after = student("ada", Some("10-B"));
    let mut changes = Changeset::new();
    changes.put_user(after.clone());
    bus.dispatch(&UserUpdated { before, after }, &mut changes).await.unwrap();
    store.commit(changes).await.unwrap();

    assert_eq!(enrolled(&store, "ada").await, subjects(&["MATH", "SCI"]));
}

#[tokio::test]
async fn losing_the_student_role_drops_enrollments() {
    let store = school().await;
    let bus = bus_for(store.clone());
    let before = student("ada", Some("10-A"));
    let mut changes = Changeset::new();
    changes.put_user(before.clone());
    bus.dispatch(&UserCreated { user: before.clone() }, &mut changes).await.unwrap();
    store.commit(changes).await.unwrap();

    let after = User { role: Role::Instructor, ..before.clone() };
    let mut changes = Changeset::new();
    changes.put_user(after.clone());
    bus.dispatch(&UserUpdated { before, after }, &mut changes).await.unwrap();
    store.commit(changes).await.unwrap();

    assert!(enrolled(&store, "ada").await.is_empty());
}

#[tokio::test]
async fn curriculum_event_updates_students() {
    let store = school().await;
    let bus = bus_for(store.clone());
    let ada = student("ada", Some("11-A"));
    insert(&store, &ada).await;

    let mut changes = Changeset::new();
    changes.attach("11-A".into(), "SCI".into());
    let event = CurriculumChanged { section: "11-A".into(), attached: vec!["SCI".into()], detached: vec![] };
    bus.dispatch(&event, &mut changes).await.unwrap();
    store.commit(changes).await.unwrap();

    assert_eq!(enrolled(&store, "ada").await, subjects(&["SCI"]));
}

#[tokio::test]
async fn persistence_failure_propagates_to_the_dispatcher() {
    let bus = bus_for(Arc::new(FaultyStore::default()));

    let mut changes = Changeset::new();
    let err = bus.dispatch(&UserCreated { user: student("ada", Some("10-A")) }, &mut changes).await.unwrap_err();

    assert!(matches!(err, EventBusError::Handler { .. }));
    let EnrollmentError::Persistence { source, .. } = err.downcast_handler::<EnrollmentError>().unwrap();
    assert!(matches!(source, PersistenceError::Unavailable { .. }));
    assert!(changes.is_empty());
}
