use super::subject_list;
use anyhow::Result;
use lyceum::Lyceum;
use lyceum::kernel::Store;
use std::io::Write;

/// Repairs every user whose enrollments drifted from their section.
///
/// # Errors
/// Store failures; users repaired before the failure stay repaired.
pub async fn run<S: Store>(school: &Lyceum<S>, out: &mut impl Write) -> Result<()> {
    let repaired = school.reconcile_all().await?;

    if repaired.is_empty() {
        writeln!(out, "All enrollments match their sections.")?;
        return Ok(());
    }

    for (id, report) in &repaired {
        writeln!(
            out,
            "{id}: +[{}] -[{}]",
            subject_list(&report.enrolled),
            subject_list(&report.unenrolled)
        )?;
    }
    writeln!(out, "Repaired {} user(s).", repaired.len())?;
    Ok(())
}
