use super::subject_list;
use anyhow::{Context, Result};
use lyceum::Lyceum;
use lyceum::domain::{NewUser, Role, SectionId, SubjectId};
use lyceum::kernel::Store;
use std::io::Write;

const SECTIONS: [(&str, &str, &[&str]); 2] =
    [("10-A", "Grade 10 A", &["MATH", "ENGL"]), ("10-B", "Grade 10 B", &["MATH", "SCI"])];
const SUBJECTS: [(&str, &str); 3] = [("MATH", "Mathematics"), ("ENGL", "English"), ("SCI", "Science")];

/// Seeds two sections, enrolls a student in 10-A and moves them to 10-B.
///
/// Run it against an empty database (`mem://` by default).
///
/// # Errors
/// Duplicate keys when the database already holds the demo data, store failures.
pub async fn run<S: Store>(school: &Lyceum<S>, out: &mut impl Write) -> Result<()> {
    let directory = school.directory();

    for (key, title) in SUBJECTS {
        directory.create_subject(SubjectId::from(key), title).await.context("Seeding subjects")?;
    }
    for (key, name, subjects) in SECTIONS {
        let section = SectionId::from(key);
        directory.create_section(section.clone(), name).await.context("Seeding sections")?;
        for subject in subjects {
            directory.attach_subject(&section, &SubjectId::from(*subject)).await?;
        }
        let curriculum = directory.curriculum(&section).await?;
        writeln!(out, "{key}: {}", subject_list(&curriculum))?;
    }

    let teacher = NewUser {
        name: "Grace Hopper".to_owned(),
        email: "grace@lyceum.test".to_owned(),
        role: Role::Teacher,
        section: None,
    };
    let teacher = directory.create_user(teacher).await?;
    let teacher_subjects = directory.enrollments(&teacher.id).await?;
    writeln!(out, "teacher {}: {}", teacher.name, subject_list(&teacher_subjects))?;

    let student = directory
        .create_user(NewUser::student("Ada Lovelace", "ada@lyceum.test", Some(SectionId::from("10-A"))))
        .await?;
    let subjects = directory.enrollments(&student.id).await?;
    writeln!(out, "student {} in 10-A: {}", student.name, subject_list(&subjects))?;

    directory.assign_section(&student.id, Some(SectionId::from("10-B"))).await?;
    let subjects = directory.enrollments(&student.id).await?;
    writeln!(out, "student {} in 10-B: {}", student.name, subject_list(&subjects))?;

    Ok(())
}
