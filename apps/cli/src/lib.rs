//! # Lyceum CLI
//!
//! Command-line administration for the school directory. Argument parsing
//! lives in [`args`]; each command is served by a function in [`handlers`]
//! writing human-readable output to any [`std::io::Write`].

pub mod args;
pub mod handlers;

use anyhow::Result;
use args::{Command, CurriculumAction, SectionAction, SubjectAction, UserAction};
use lyceum::Lyceum;
use lyceum::kernel::Store;
use std::io::Write;

/// Runs one parsed command against `school`.
///
/// # Errors
/// Whatever the handler returns: validation failures, unknown ids, store errors.
pub async fn execute<S: Store>(school: &Lyceum<S>, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Demo {} => handlers::demo::run(school, out).await,
        Command::Section { action } => match action {
            SectionAction::Add { key, name } => handlers::catalog::add_section(school, &key, &name, out).await,
            SectionAction::Show { key } => handlers::catalog::show_section(school, &key, out).await,
        },
        Command::Subject { action } => match action {
            SubjectAction::Add { key, title } => handlers::catalog::add_subject(school, &key, &title, out).await,
        },
        Command::Curriculum { action } => match action {
            CurriculumAction::Attach { section, subject } => {
                handlers::catalog::attach(school, &section, &subject, out).await
            },
            CurriculumAction::Detach { section, subject } => {
                handlers::catalog::detach(school, &section, &subject, out).await
            },
        },
        Command::User { action } => match action {
            UserAction::Add(args) => handlers::users::add(school, args, out).await,
            UserAction::Move { id, section } => handlers::users::move_to(school, &id, section, out).await,
            UserAction::Delete { id } => handlers::users::delete(school, &id, out).await,
            UserAction::Restore { id } => handlers::users::restore(school, &id, out).await,
            UserAction::Show { id } => handlers::users::show(school, &id, out).await,
        },
        Command::Reconcile {} => handlers::reconcile::run(school, out).await,
    }
}
