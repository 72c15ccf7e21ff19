//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::Form;
use crate::record::Course;

/// Add command arguments.
///
/// Every value is optional on the command line so that an incomplete
/// submission reaches the same validation as the interactive form.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Course
    #[arg(long, value_enum)]
    pub course: Option<CourseArg>,

    /// Username
    #[arg(long)]
    pub username: Option<String>,

    /// Password (stored as typed)
    #[arg(long)]
    pub password: Option<String>,
}

impl AddCommand {
    /// Fill a form from the arguments; absent values stay blank.
    #[must_use]
    pub fn to_form(&self) -> Form {
        Form {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            course: self.course.map(Course::from),
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Row number as shown by `list` (starting at 1)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub row: u64,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Course argument for the add command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CourseArg {
    /// BSIT
    #[value(name = "BSIT")]
    Bsit,
    /// BSMet
    #[value(name = "BSMet")]
    BsMet,
    /// BS-CRIM
    #[value(name = "BS-CRIM")]
    BsCrim,
    /// BSN
    #[value(name = "BSN")]
    Bsn,
    /// BSHM
    #[value(name = "BSHM")]
    Bshm,
    /// BSCS
    #[value(name = "BSCS")]
    Bscs,
}

impl From<CourseArg> for Course {
    fn from(arg: CourseArg) -> Self {
        match arg {
            CourseArg::Bsit => Self::Bsit,
            CourseArg::BsMet => Self::BsMet,
            CourseArg::BsCrim => Self::BsCrim,
            CourseArg::Bsn => Self::Bsn,
            CourseArg::Bshm => Self::Bshm,
            CourseArg::Bscs => Self::Bscs,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
