use super::{describe, subject_list};
use crate::args::NewUserArgs;
use anyhow::Result;
use lyceum::Lyceum;
use lyceum::domain::{NewUser, SectionId, UserId};
use lyceum::kernel::Store;
use std::io::Write;

/// Creates a user; students with a section are enrolled right away.
///
/// # Errors
/// Validation failures, unknown section, hook or store failures.
pub async fn add<S: Store>(school: &Lyceum<S>, args: NewUserArgs, out: &mut impl Write) -> Result<()> {
    let input = NewUser {
        name: args.name,
        email: args.email,
        role: args.role,
        section: args.section.map(SectionId::from),
    };
    let user = school.directory().create_user(input).await?;
    writeln!(out, "Created {}", describe(&user))?;
    enrollments(school, &user.id, out).await
}

/// Moves a user to `section`, or clears the section when `None`.
///
/// # Errors
/// Unknown user or section, hook or store failures.
pub async fn move_to<S: Store>(
    school: &Lyceum<S>,
    id: &str,
    section: Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    let id = UserId::from(id);
    let user = school.directory().assign_section(&id, section.map(SectionId::from)).await?;
    writeln!(out, "Updated {}", describe(&user))?;
    enrollments(school, &id, out).await
}

/// Soft-deletes a user.
///
/// # Errors
/// Unknown user, store failures.
pub async fn delete<S: Store>(school: &Lyceum<S>, id: &str, out: &mut impl Write) -> Result<()> {
    let user = school.directory().delete_user(&UserId::from(id)).await?;
    writeln!(out, "Deleted {}", describe(&user))?;
    Ok(())
}

/// Restores a soft-deleted user.
///
/// # Errors
/// Unknown user, store failures.
pub async fn restore<S: Store>(school: &Lyceum<S>, id: &str, out: &mut impl Write) -> Result<()> {
    let user = school.directory().restore_user(&UserId::from(id)).await?;
    writeln!(out, "Restored {}", describe(&user))?;
    Ok(())
}

/// Prints a user and their enrollments.
///
/// # Errors
/// Unknown user, store failures.
pub async fn show<S: Store>(school: &Lyceum<S>, id: &str, out: &mut impl Write) -> Result<()> {
    let id = UserId::from(id);
    let user = school.directory().user(&id).await?;
    writeln!(out, "{}", describe(&user))?;
    enrollments(school, &id, out).await
}

async fn enrollments<S: Store>(school: &Lyceum<S>, id: &UserId, out: &mut impl Write) -> Result<()> {
    let subjects = school.directory().enrollments(id).await?;
    writeln!(out, "  enrolled: {}", subject_list(&subjects))?;
    Ok(())
}
