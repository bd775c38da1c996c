//! Command handlers and their clap argument wrappers.
//!
//! Clap structs stay in this crate and convert into the core parameter
//! types with `From`, so the core never sees framework derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use serde::Deserialize;
use wordman_core::{
    params::{EnsureLessons, FinishPlan, Id, InstallList},
    NewWord, OperationStatus, Planner, PlannerError,
};

use crate::renderer::TerminalRenderer;

/// On-disk word list format accepted by `list import`.
///
/// ```json
/// { "name": "Basics", "words": [{ "spelling": "apple", "definition": "a fruit" }] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ListFile {
    pub name: String,
    pub words: Vec<NewWord>,
}

impl From<ListFile> for InstallList {
    fn from(val: ListFile) -> Self {
        InstallList {
            name: val.name,
            words: val.words,
        }
    }
}

/// Install a word list from a JSON file
#[derive(Args)]
pub struct ImportListArgs {
    #[arg(help = "Path to a JSON file with a name and an ordered array of words")]
    pub file: PathBuf,
}

/// Show a word list with its progress counters
#[derive(Args)]
pub struct ShowListArgs {
    #[arg(help = "Unique identifier of the word list")]
    pub id: u64,
}

impl From<ShowListArgs> for Id {
    fn from(val: ShowListArgs) -> Self {
        Id { id: val.id }
    }
}

/// Start studying a word list
///
/// Marks the list as selected and, the first time, cuts it into daily
/// lessons. The first lesson is due today. Selecting a list again keeps its
/// existing lessons.
#[derive(Args)]
pub struct SelectListArgs {
    #[arg(help = "Unique identifier of the word list to study")]
    pub id: u64,
    #[arg(long, help = "Words per lesson (20-100)")]
    pub page_size: Option<u32>,
}

impl From<SelectListArgs> for EnsureLessons {
    fn from(val: SelectListArgs) -> Self {
        EnsureLessons {
            list_id: val.id,
            page_size: val.page_size,
        }
    }
}

/// Stop studying a word list
#[derive(Args)]
pub struct DeselectListArgs {
    #[arg(help = "Unique identifier of the word list to set aside")]
    pub id: u64,
}

impl From<DeselectListArgs> for Id {
    fn from(val: DeselectListArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Install a word list from a JSON file
    #[command(alias = "i")]
    Import(ImportListArgs),
    /// Show a word list with its progress counters
    #[command(alias = "s")]
    Show(ShowListArgs),
    /// Start studying a word list
    #[command(alias = "sel")]
    Select(SelectListArgs),
    /// Stop studying a word list
    #[command(alias = "d")]
    Deselect(DeselectListArgs),
    /// Count the words installed across all lists
    #[command(alias = "w")]
    Words,
}

/// Arguments naming the word list a command works on
#[derive(Args)]
pub struct ListIdArgs {
    #[arg(help = "Unique identifier of the word list")]
    pub list_id: u64,
}

impl From<ListIdArgs> for Id {
    fn from(val: ListIdArgs) -> Self {
        Id { id: val.list_id }
    }
}

/// Arguments naming a lesson or review plan to complete
#[derive(Args)]
pub struct FinishArgs {
    #[arg(help = "Unique identifier of the word list")]
    pub list_id: u64,
    #[arg(help = "Unique identifier of the plan to mark as finished")]
    pub plan_id: u64,
}

impl From<FinishArgs> for FinishPlan {
    fn from(val: FinishArgs) -> Self {
        FinishPlan {
            list_id: val.list_id,
            plan_id: val.plan_id,
        }
    }
}

#[derive(Subcommand)]
pub enum LessonCommands {
    /// Show the lesson due today with its words
    #[command(alias = "t")]
    Today(ListIdArgs),
    /// Mark a lesson as learned and schedule its reviews
    #[command(alias = "f")]
    Finish(FinishArgs),
    /// Show every lesson of a list
    #[command(alias = "p")]
    Plans(ListIdArgs),
}

/// Show a review round with its five stages
#[derive(Args)]
pub struct ShowRoundArgs {
    #[arg(help = "Unique identifier of the review round")]
    pub round_id: u64,
}

impl From<ShowRoundArgs> for Id {
    fn from(val: ShowRoundArgs) -> Self {
        Id { id: val.round_id }
    }
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Show the review due today with its words
    #[command(alias = "t")]
    Today(ListIdArgs),
    /// Mark a review as done
    #[command(alias = "f")]
    Finish(FinishArgs),
    /// Show a review round with its five stages
    #[command(alias = "r")]
    Round(ShowRoundArgs),
    /// Show every review of a list
    #[command(alias = "p")]
    Plans(ListIdArgs),
}

/// Runs commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Shows every word list with today's outstanding lessons and reviews.
    pub async fn list_summaries(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_summaries()
            .await
            .context("Failed to load word lists")?;
        self.renderer.render(&summaries)
    }

    pub async fn handle_list_command(&self, command: ListCommands) -> Result<()> {
        match command {
            ListCommands::Import(args) => self.import_list(args).await,
            ListCommands::Show(args) => {
                let list = self
                    .planner
                    .require_list(&args.into())
                    .await
                    .context("Failed to load word list")?;
                self.renderer.render(&list)
            }
            ListCommands::Select(args) => self.select_list(args).await,
            ListCommands::Deselect(args) => {
                let list = self
                    .planner
                    .deselect_list(&args.into())
                    .await
                    .context("Failed to deselect word list")?;
                self.renderer.render(&OperationStatus::success(format!(
                    "Stopped studying '{}'",
                    list.name
                )))
            }
            ListCommands::Words => {
                let count = self
                    .planner
                    .count_words()
                    .await
                    .context("Failed to count words")?;
                self.renderer.render(&format!("{count} words installed.\n"))
            }
        }
    }

    async fn import_list(&self, args: ImportListArgs) -> Result<()> {
        let content = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let file: ListFile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid word list file {}", args.file.display()))?;
        debug!("Importing '{}' with {} words", file.name, file.words.len());

        let list = self
            .planner
            .install_list(&file.into())
            .await
            .context("Failed to install word list")?;

        self.renderer.render(&OperationStatus::success(format!(
            "Installed '{}' with {} words (ID: {})",
            list.name, list.size, list.id
        )))
    }

    async fn select_list(&self, args: SelectListArgs) -> Result<()> {
        let id = Id { id: args.id };
        let list = self
            .planner
            .select_list(&id)
            .await
            .context("Failed to select word list")?;
        let lessons = self
            .planner
            .ensure_lesson_plans(&args.into())
            .await
            .context("Failed to plan lessons")?;

        self.renderer.render(&OperationStatus::success(format!(
            "Studying '{}': {} lessons planned",
            list.name,
            lessons.len()
        )))
    }

    /// A repeated completion is a no-op, so it is reported without failing
    /// the command.
    fn report_already_done(&self, error: &PlannerError) -> Result<()> {
        debug!("Ignoring repeated completion: {error}");
        self.renderer.render(&OperationStatus::failure(error.to_string()))
    }

    pub async fn handle_lesson_command(&self, command: LessonCommands) -> Result<()> {
        match command {
            LessonCommands::Today(args) => {
                let due = self
                    .planner
                    .due_lesson(&args.into())
                    .await
                    .context("Failed to load today's lesson")?;
                match due {
                    Some(lesson) => self.renderer.render(&lesson),
                    None => self.renderer.render("No lessons due today.\n"),
                }
            }
            LessonCommands::Finish(args) => match self.planner.finish_lesson(&args.into()).await {
                Ok(completion) => self.renderer.render(&completion),
                Err(e) if e.is_already_done() => self.report_already_done(&e),
                Err(e) => Err(e).context("Failed to finish lesson"),
            },
            LessonCommands::Plans(args) => {
                let plans = self
                    .planner
                    .lesson_plans(&args.into())
                    .await
                    .context("Failed to load lesson plans")?;
                self.renderer.render(&plans)
            }
        }
    }

    pub async fn handle_review_command(&self, command: ReviewCommands) -> Result<()> {
        match command {
            ReviewCommands::Today(args) => {
                let due = self
                    .planner
                    .due_review(&args.into())
                    .await
                    .context("Failed to load today's review")?;
                match due {
                    Some(review) => self.renderer.render(&review),
                    None => self.renderer.render("No reviews due today.\n"),
                }
            }
            ReviewCommands::Finish(args) => match self.planner.finish_review(&args.into()).await {
                Ok(completion) => self.renderer.render(&completion),
                Err(e) if e.is_already_done() => self.report_already_done(&e),
                Err(e) => Err(e).context("Failed to finish review"),
            },
            ReviewCommands::Round(args) => {
                let round = self
                    .planner
                    .review_round(&args.into())
                    .await
                    .context("Failed to load review round")?;
                self.renderer.render(&round)
            }
            ReviewCommands::Plans(args) => {
                let plans = self
                    .planner
                    .review_plans(&args.into())
                    .await
                    .context("Failed to load review plans")?;
                self.renderer.render(&plans)
            }
        }
    }
}
