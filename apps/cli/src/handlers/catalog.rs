use super::subject_list;
use anyhow::Result;
use lyceum::Lyceum;
use lyceum::domain::{SectionId, SubjectId};
use lyceum::kernel::Store;
use std::io::Write;

/// Creates a section.
///
/// # Errors
/// Invalid or duplicate key, store failures.
pub async fn add_section<S: Store>(school: &Lyceum<S>, key: &str, name: &str, out: &mut impl Write) -> Result<()> {
    let section = school.directory().create_section(SectionId::from(key), name).await?;
    writeln!(out, "Created section {} ({})", section.id, section.name)?;
    Ok(())
}

/// Prints the subjects of a section.
///
/// # Errors
/// Unknown section, store failures.
pub async fn show_section<S: Store>(school: &Lyceum<S>, key: &str, out: &mut impl Write) -> Result<()> {
    let subjects = school.directory().curriculum(&SectionId::from(key)).await?;
    writeln!(out, "{key}: {}", subject_list(&subjects))?;
    Ok(())
}

/// Creates a subject.
///
/// # Errors
/// Invalid or duplicate key, store failures.
pub async fn add_subject<S: Store>(school: &Lyceum<S>, key: &str, title: &str, out: &mut impl Write) -> Result<()> {
    let subject = school.directory().create_subject(SubjectId::from(key), title).await?;
    writeln!(out, "Created subject {} ({})", subject.id, subject.title)?;
    Ok(())
}

/// Adds a subject to a section's curriculum.
///
/// # Errors
/// Unknown section or subject, hook or store failures.
pub async fn attach<S: Store>(school: &Lyceum<S>, section: &str, subject: &str, out: &mut impl Write) -> Result<()> {
    let changed = school.directory().attach_subject(&SectionId::from(section), &SubjectId::from(subject)).await?;
    if changed {
        writeln!(out, "Attached {subject} to {section}")?;
    } else {
        writeln!(out, "{subject} is already part of {section}")?;
    }
    Ok(())
}

/// Removes a subject from a section's curriculum.
///
/// # Errors
/// Unknown section or subject, hook or store failures.
pub async fn detach<S: Store>(school: &Lyceum<S>, section: &str, subject: &str, out: &mut impl Write) -> Result<()> {
    let changed = school.directory().detach_subject(&SectionId::from(section), &SubjectId::from(subject)).await?;
    if changed {
        writeln!(out, "Detached {subject} from {section}")?;
    } else {
        writeln!(out, "{subject} is not part of {section}")?;
    }
    Ok(())
}
