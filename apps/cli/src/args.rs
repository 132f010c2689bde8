//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use lyceum::domain::Role;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lyceum")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Administration tool for the Lyceum school directory")]
pub struct Cli {
    /// Configuration file (TOML). Defaults to `lyceum` in the working directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `database.url` (e.g. `mem://`, `ws://localhost:8000`, `rocksdb://data`)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed two sections, enroll a student and move them between sections
    Demo {},
    /// Manage sections
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },
    /// Manage subjects
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },
    /// Edit section curricula
    Curriculum {
        #[command(subcommand)]
        action: CurriculumAction,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Repair enrollments that drifted from section curricula
    Reconcile {},
}

#[derive(Debug, Subcommand)]
pub enum SectionAction {
    /// Create a section
    Add {
        /// Stable key, e.g. `10-A`
        key: String,
        /// Display name
        name: String,
    },
    /// Show the subjects of a section
    Show { key: String },
}

#[derive(Debug, Subcommand)]
pub enum SubjectAction {
    /// Create a subject
    Add {
        /// Stable key, e.g. `MATH`
        key: String,
        /// Display title
        title: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CurriculumAction {
    /// Add a subject to a section and enroll its students
    Attach { section: String, subject: String },
    /// Remove a subject from a section and unenroll its students
    Detach { section: String, subject: String },
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Create a user
    Add(NewUserArgs),
    /// Move a student to another section (omit `--section` to clear it)
    Move {
        id: String,
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Soft-delete a user
    Delete { id: String },
    /// Restore a soft-deleted user
    Restore { id: String },
    /// Print a user and their enrollments
    Show { id: String },
}

#[derive(Debug, Args)]
pub struct NewUserArgs {
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub email: String,
    #[arg(short, long, default_value = "student")]
    pub role: Role,
    /// Section key, students only
    #[arg(short, long)]
    pub section: Option<String>,
}
