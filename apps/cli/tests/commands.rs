use lyceum::Lyceum;
use lyceum::domain::{NewUser, SectionId, SubjectId};
use lyceum::kernel::{Changeset, MemoryStore};
use lyceum_cli::args::{Cli, Command};
use lyceum_cli::execute;
use clap::Parser;
use std::sync::Arc;

fn school() -> Lyceum<MemoryStore> {
    Lyceum::init(Arc::new(MemoryStore::new()))
}

async fn run(school: &Lyceum<MemoryStore>, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("lyceum").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    execute(school, cli.command, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn demo_moves_student_between_sections() {
    let school = school();

    let output = run(&school, &["demo"]).await.unwrap();

    assert!(output.contains("10-A: ENGL, MATH"), "{output}");
    assert!(output.contains("10-B: MATH, SCI"), "{output}");
    assert!(output.contains("teacher Grace Hopper: -"), "{output}");
    assert!(output.contains("in 10-A: ENGL, MATH"), "{output}");
    assert!(output.contains("in 10-B: MATH, SCI"), "{output}");
}

#[tokio::test]
async fn demo_twice_fails_on_duplicate_keys() {
    let school = school();
    run(&school, &["demo"]).await.unwrap();

    let err = run(&school, &["demo"]).await.unwrap_err();
    assert!(err.to_string().contains("Seeding subjects"), "{err:#}");
}

#[tokio::test]
async fn catalog_and_user_commands() {
    let school = school();
    run(&school, &["subject", "add", "MATH", "Mathematics"]).await.unwrap();
    run(&school, &["section", "add", "10-A", "Grade 10 A"]).await.unwrap();

    let output = run(&school, &["curriculum", "attach", "10-A", "MATH"]).await.unwrap();
    assert_eq!(output, "Attached MATH to 10-A\n");
    let output = run(&school, &["curriculum", "attach", "10-A", "MATH"]).await.unwrap();
    assert_eq!(output, "MATH is already part of 10-A\n");

    let output = run(&school, &["user", "add", "-n", "Ada", "-e", "ada@lyceum.test", "-s", "10-A"]).await.unwrap();
    assert!(output.ends_with("  enrolled: MATH\n"), "{output}");

    let id = school.directory().users().await.unwrap()[0].id.to_string();
    let output = run(&school, &["user", "move", &id]).await.unwrap();
    assert!(output.contains("section=-"), "{output}");
    assert!(output.ends_with("  enrolled: -\n"), "{output}");

    let output = run(&school, &["user", "delete", &id]).await.unwrap();
    assert!(output.contains("(deleted)"), "{output}");
    let output = run(&school, &["user", "restore", &id]).await.unwrap();
    assert!(!output.contains("(deleted)"), "{output}");

    let output = run(&school, &["section", "show", "10-A"]).await.unwrap();
    assert_eq!(output, "10-A: MATH\n");
}

#[tokio::test]
async fn unknown_user_is_an_error() {
    let school = school();
    let err = run(&school, &["user", "show", "nobody"]).await.unwrap_err();
    assert!(err.to_string().contains("nobody"), "{err:#}");
}

#[tokio::test]
async fn reconcile_reports_repaired_users() {
    let school = school();
    let directory = school.directory();
    directory.create_subject(SubjectId::from("MATH"), "Mathematics").await.unwrap();
    directory.create_section(SectionId::from("10-A"), "Grade 10 A").await.unwrap();
    let student = directory
        .create_user(NewUser::student("Ada", "ada@lyceum.test", Some(SectionId::from("10-A"))))
        .await
        .unwrap();

    assert_eq!(run(&school, &["reconcile"]).await.unwrap(), "All enrollments match their sections.\n");

    // Curriculum link written behind the directory's back.
    let mut changes = Changeset::new();
    changes.attach(SectionId::from("10-A"), SubjectId::from("MATH"));
    directory.commit(changes).await.unwrap();

    let output = run(&school, &["reconcile"]).await.unwrap();
    assert_eq!(output, format!("{}: +[MATH] -[-]\nRepaired 1 user(s).\n", student.id));
}
