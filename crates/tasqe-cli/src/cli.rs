//! Command definitions and their handlers.
//!
//! Each clap argument struct converts into the matching core parameter type
//! with `From`, so clap attributes never leak into `tasqe-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Organizer
//! ```

use std::{fmt::Write as _, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::debug;
use tasqe_core::{
    display::OperationStatus,
    params::{
        AddSubtask, AddTask, CategoryLocation, GenerateTodo, ListName, RenameList, TaskLocation,
        Upcoming,
    },
    GenerateOutcome, MergeMode, Organizer, PipelineState,
};

use crate::renderer::TerminalRenderer;

/// Merge policy as accepted on the command line.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum MergeModeArg {
    /// Overwrite the list
    Replace,
    /// Add new categories and append tasks to matching ones
    Append,
}

impl From<MergeModeArg> for MergeMode {
    fn from(val: MergeModeArg) -> Self {
        match val {
            MergeModeArg::Replace => MergeMode::Replace,
            MergeModeArg::Append => MergeMode::Append,
        }
    }
}

/// Generate a to-do list from a description of your week
#[derive(Args)]
pub struct GenerateArgs {
    /// What is coming up this week, in your own words
    pub text: String,
    /// List to save into; defaults to "To Do List"
    #[arg(short, long)]
    pub list: Option<String>,
    /// How to combine the result with an existing list
    #[arg(short, long, value_enum, default_value_t = MergeModeArg::Replace)]
    pub mode: MergeModeArg,
    /// Print the generated list without saving it
    #[arg(long)]
    pub dry_run: bool,
}

impl From<GenerateArgs> for GenerateTodo {
    fn from(val: GenerateArgs) -> Self {
        GenerateTodo {
            text: val.text,
            list: val.list,
            mode: val.mode.into(),
        }
    }
}

/// A list identified by name
#[derive(Args)]
pub struct ListNameArgs {
    /// Name of the list
    pub name: String,
}

impl From<ListNameArgs> for ListName {
    fn from(val: ListNameArgs) -> Self {
        ListName { name: val.name }
    }
}

/// Rename a list
#[derive(Args)]
pub struct RenameListArgs {
    /// Current name
    pub from: String,
    /// New name
    pub to: String,
}

impl From<RenameListArgs> for RenameList {
    fn from(val: RenameListArgs) -> Self {
        RenameList {
            from: val.from,
            to: val.to,
        }
    }
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// List all lists, favorites first
    #[command(aliases = ["l", "ls"])]
    All,
    /// Show a list with its categories and tasks
    #[command(alias = "s")]
    Show(ListNameArgs),
    /// Rename a list
    #[command(alias = "mv")]
    Rename(RenameListArgs),
    /// Delete a list
    #[command(aliases = ["d", "rm"])]
    Delete(ListNameArgs),
    /// Mark or unmark a list as favorite
    #[command(alias = "f")]
    Favorite(ListNameArgs),
}

/// Add a task to a category, creating either when missing
#[derive(Args)]
pub struct AddTaskArgs {
    /// Category name, matched ignoring case
    pub category: String,
    /// Task name
    pub name: String,
    /// List to add to; defaults to "To Do List"
    #[arg(short, long)]
    pub list: Option<String>,
    /// Longer description
    #[arg(short, long)]
    pub descr: Option<String>,
    /// Time estimate, e.g. "45 mins"
    #[arg(short, long)]
    pub time: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask {
            list: val.list,
            category: val.category,
            name: val.name,
            descr: val.descr,
            time: val.time,
            date: val.date,
        }
    }
}

/// Add a subtask to a task
#[derive(Args)]
pub struct AddSubtaskArgs {
    /// List name
    pub list: String,
    /// Category position, as shown by `tq list show`
    pub category: usize,
    /// Task position within the category
    pub task: usize,
    /// Subtask name
    pub name: String,
    /// Time estimate
    #[arg(short, long)]
    pub time: Option<String>,
}

impl From<AddSubtaskArgs> for AddSubtask {
    fn from(val: AddSubtaskArgs) -> Self {
        AddSubtask {
            list: val.list,
            category: val.category,
            task: val.task,
            name: val.name,
            time: val.time,
        }
    }
}

/// Position of a task, or of a subtask when given
#[derive(Args)]
pub struct TaskLocationArgs {
    /// List name
    pub list: String,
    /// Category position, as shown by `tq list show`
    pub category: usize,
    /// Task position within the category
    pub task: usize,
    /// Subtask position within the task
    pub subtask: Option<usize>,
}

impl From<TaskLocationArgs> for TaskLocation {
    fn from(val: TaskLocationArgs) -> Self {
        TaskLocation {
            list: val.list,
            category: val.category,
            task: val.task,
            subtask: val.subtask,
        }
    }
}

/// Position of a category
#[derive(Args)]
pub struct CategoryLocationArgs {
    /// List name
    pub list: String,
    /// Category position, as shown by `tq list show`
    pub category: usize,
}

impl From<CategoryLocationArgs> for CategoryLocation {
    fn from(val: CategoryLocationArgs) -> Self {
        CategoryLocation {
            list: val.list,
            category: val.category,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Add a subtask to a task
    #[command(alias = "sub")]
    AddSubtask(AddSubtaskArgs),
    /// Toggle a task or subtask between done and open
    #[command(alias = "d")]
    Done(TaskLocationArgs),
    /// Remove a task or subtask
    #[command(alias = "rm")]
    Remove(TaskLocationArgs),
    /// Remove a category and all its tasks
    #[command(alias = "rmc")]
    RemoveCategory(CategoryLocationArgs),
}

/// Show dated tasks across all lists
#[derive(Args)]
pub struct UpcomingArgs {
    /// Day to look at (YYYY-MM-DD); today shows the coming week
    #[arg(short, long)]
    pub day: Option<String>,
}

impl From<UpcomingArgs> for Upcoming {
    fn from(val: UpcomingArgs) -> Self {
        Upcoming { day: val.day }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings
    #[command(alias = "s")]
    Show,
    /// Save the model provider API key
    SetKey {
        /// API key
        key: String,
    },
    /// Turn dark mode on or off
    DarkMode {
        #[arg(value_enum)]
        state: Switch,
    },
}

/// Runs commands against an organizer and renders their output.
pub struct Cli {
    organizer: Organizer,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(organizer: Organizer, renderer: TerminalRenderer) -> Self {
        Self {
            organizer,
            renderer,
        }
    }

    pub async fn generate(self, args: GenerateArgs) -> Result<()> {
        let dry_run = args.dry_run;
        let params: GenerateTodo = args.into();

        let organizer = self.organizer.clone().with_observer(Arc::new(|state: &PipelineState| {
            if let PipelineState::Extracting | PipelineState::Structuring { .. } = state {
                eprintln!("… {state}");
            }
        }));

        if dry_run {
            let document = organizer.generate(&params.text).await?.into_result()?;
            return self.renderer.render(&document.to_string());
        }

        match organizer.generate_todo(&params).await? {
            outcome @ GenerateOutcome::Merged { .. } => self.renderer.render(&outcome.to_string()),
            GenerateOutcome::Rejected(rejection) => bail!("{rejection}"),
        }
    }

    pub async fn history(&self) -> Result<()> {
        let history = self.organizer.history().await?;
        self.renderer.render(&history.to_string())
    }

    pub async fn handle_list_command(&self, command: ListCommands) -> Result<()> {
        match command {
            ListCommands::All => self.list_lists().await,
            ListCommands::Show(args) => {
                let params: ListName = args.into();
                match self.organizer.show_list(&params).await? {
                    Some(list) => self.renderer.render(&list.to_string()),
                    None => bail!("List '{}' not found", params.name),
                }
            }
            ListCommands::Rename(args) => {
                let params: RenameList = args.into();
                self.organizer.rename_list(&params).await?;
                self.status(format!("Renamed '{}' to '{}'", params.from, params.to.trim()))
            }
            ListCommands::Delete(args) => {
                let params: ListName = args.into();
                match self.organizer.delete_list(&params).await? {
                    Some(list) => {
                        let summary = list.summary();
                        let mut status = OperationStatus::success(format!(
                            "Deleted list '{}'",
                            list.name
                        ))
                        .with_detail(format!(
                            "{} categories, {} tasks removed",
                            summary.category_count, summary.task_count
                        ));
                        if list.favorite {
                            status = status.with_detail("Removed from favorites");
                        }
                        self.report(status)
                    }
                    None => bail!("List '{}' not found", params.name),
                }
            }
            ListCommands::Favorite(args) => {
                let params: ListName = args.into();
                let favorite = self.organizer.toggle_favorite(&params).await?;
                let verb = if favorite { "Starred" } else { "Unstarred" };
                self.status(format!("{verb} '{}'", params.name))
            }
        }
    }

    /// Sidebar-style overview; the default command.
    pub async fn list_lists(&self) -> Result<()> {
        let summaries = self.organizer.list_summaries().await?;
        let mut output = String::from("# Lists\n\n");
        write!(output, "{summaries}")?;
        self.renderer.render(&output)
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let params: AddTask = args.into();
                let path = self.organizer.add_task(&params).await?;
                self.status(format!(
                    "Added '{}' as task {}.{}",
                    params.name.trim(),
                    path.category + 1,
                    path.task + 1
                ))
            }
            TaskCommands::AddSubtask(args) => {
                let params: AddSubtask = args.into();
                self.organizer.add_subtask(&params).await?;
                self.status(format!("Added subtask '{}'", params.name.trim()))
            }
            TaskCommands::Done(args) => {
                let params: TaskLocation = args.into();
                let done = self.organizer.toggle_done(&params).await?;
                let state = if done { "done" } else { "open" };
                self.status(format!("Marked {state}"))
            }
            TaskCommands::Remove(args) => {
                let params: TaskLocation = args.into();
                let name = self.organizer.remove_task(&params).await?;
                self.status(format!("Removed '{name}'"))
            }
            TaskCommands::RemoveCategory(args) => {
                let params: CategoryLocation = args.into();
                let category = self.organizer.remove_category(&params).await?;
                self.report(
                    OperationStatus::success(format!("Removed category '{}'", category.name))
                        .with_detail(format!("{} tasks removed", category.items.len())),
                )
            }
        }
    }

    pub async fn upcoming(&self, args: UpcomingArgs) -> Result<()> {
        let upcoming = self.organizer.upcoming(&args.into()).await?;
        let mut output = String::from("# Upcoming\n\n");
        write!(output, "{upcoming}")?;
        self.renderer.render(&output)
    }

    pub async fn export(&self, file: Option<PathBuf>) -> Result<()> {
        let json = self.organizer.export_json().await?;
        match file {
            Some(path) => {
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                self.status(format!("Exported lists to {}", path.display()))
            }
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }

    pub async fn import(&self, file: PathBuf) -> Result<()> {
        let json = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let count = self.organizer.import_json(&json).await?;
        debug!("Imported from {}", file.display());
        self.status(format!("Imported {count} lists"))
    }

    pub async fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                let prefs = self.organizer.preferences().await?;
                let config = self.organizer.client_config();
                let dark_mode = match prefs.dark_mode {
                    Some(true) => "on",
                    Some(false) => "off",
                    None => "system",
                };

                let mut output = String::from("# Settings\n\n");
                writeln!(
                    output,
                    "- **API key**: {}",
                    if prefs.has_api_key { "set" } else { "not set" }
                )?;
                writeln!(output, "- **API base**: {}", config.api_base)?;
                writeln!(output, "- **Model**: {}", config.model)?;
                writeln!(output, "- **Dark mode**: {dark_mode}")?;
                writeln!(
                    output,
                    "- **Setup complete**: {}",
                    if prefs.preferences_set { "yes" } else { "no" }
                )?;
                self.renderer.render(&output)
            }
            ConfigCommands::SetKey { key } => {
                self.organizer.set_api_key(&key).await?;
                self.status("API key saved".to_string())
            }
            ConfigCommands::DarkMode { state } => {
                let enabled = state == Switch::On;
                self.organizer.set_dark_mode(enabled).await?;
                self.status(format!("Dark mode {}", if enabled { "on" } else { "off" }))
            }
        }
    }

    fn status(&self, message: String) -> Result<()> {
        self.report(OperationStatus::success(message))
    }

    fn report(&self, status: OperationStatus) -> Result<()> {
        self.renderer.render(&status.to_string())
    }
}
