use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ConfigCommands, GenerateArgs, ListCommands, TaskCommands, UpcomingArgs};

/// Turn a free-form description of your week into a structured to-do list
///
/// Describe what is coming up in plain language; tasqe asks a language model
/// for an outline, structures it into categories, tasks and subtasks, and
/// saves it as a named list you can browse and edit from the terminal.
#[derive(Parser)]
#[command(version, about, name = "tq")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tasqe/tasqe.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base URL of the OpenAI-compatible model provider
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Model used for both generation stages
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a to-do list from a description of your week
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Show the most recent queries
    #[command(alias = "h")]
    History,
    /// Manage lists
    #[command(alias = "l")]
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Edit tasks inside a list
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show dated tasks across all lists
    #[command(alias = "u")]
    Upcoming(UpcomingArgs),
    /// Write all lists as JSON to a file, or stdout
    Export {
        /// Output file; stdout when omitted
        file: Option<PathBuf>,
    },
    /// Replace all lists with the contents of a JSON file
    Import {
        /// File produced by `tq export`
        file: PathBuf,
    },
    /// Show or change settings
    #[command(alias = "c")]
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Start the MCP server
    Serve,
}
