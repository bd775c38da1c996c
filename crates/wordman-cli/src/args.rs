use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;

use crate::cli::{LessonCommands, ListCommands, ReviewCommands};

/// Vocabulary lessons and spaced-repetition reviews
///
/// Wordman cuts word lists into daily lessons and schedules five reviews for
/// every finished lesson, one, two, four, seven and fifteen days later. Run
/// without a command to see what is due today.
#[derive(Parser)]
#[command(version, about, name = "wordman")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/wordman/wordman.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Words per lesson when a list is selected without --page-size (20-100)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Treat this date (YYYY-MM-DD) as today instead of the system date
    #[arg(long, global = true)]
    pub today: Option<Date>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Wordman CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Install, inspect and select word lists
    #[command(alias = "l")]
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Learn new words
    #[command(alias = "n")]
    Lesson {
        #[command(subcommand)]
        command: LessonCommands,
    },
    /// Review learned words
    #[command(alias = "r")]
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
}
