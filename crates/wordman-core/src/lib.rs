//! Core library for the Wordman vocabulary scheduler.
//!
//! Word lists are paged into daily lessons; each finished lesson starts a
//! five-stage review round (1, 2, 4, 7 and 15 days after completion), and
//! per-list counters track how many words have been learned and fully
//! reviewed.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] as
//!   markdown
//! - **Display Wrappers** ([`display`]): Collections, completion results and
//!   status messages
//! - **Terminal Rendering**: The CLI hands the markdown to termimad
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use jiff::civil::date;
//! use wordman_core::{
//!     models::NewWord,
//!     params::{EnsureLessons, Id, InstallList},
//!     ManualClock, PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .with_clock(Arc::new(ManualClock::new(date(2024, 3, 1))))
//!     .build()
//!     .await?;
//!
//! let list = planner
//!     .install_list(&InstallList {
//!         name: "Fruit".to_string(),
//!         words: vec![NewWord::new("apple"), NewWord::new("pear")],
//!     })
//!     .await?;
//!
//! planner.select_list(&Id { id: list.id }).await?;
//! let lessons = planner
//!     .ensure_lesson_plans(&EnsureLessons { list_id: list.id, page_size: None })
//!     .await?;
//! assert_eq!(lessons.len(), 1);
//!
//! println!("{}", planner.list_summaries().await?);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use db::Database;
pub use display::{LessonPlans, ListSummaries, OperationStatus, ReviewPlans};
pub use error::{PlanKind, PlannerError, Result};
pub use models::{
    DueLesson, DueReview, LessonCompletion, LessonPlan, ListSummary, NewWord, PlanState,
    ReviewCompletion, ReviewPlan, ReviewRound, Word, WordList, WordListState,
};
pub use params::{EnsureLessons, FinishPlan, Id, InstallList};
pub use planner::{Planner, PlannerBuilder};
