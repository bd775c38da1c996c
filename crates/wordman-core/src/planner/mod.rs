//! High-level planner API: lessons, reviews and list selection.
//!
//! [`Planner`] is the service object every front end talks to. It owns no
//! state besides its configuration; each operation opens the database on a
//! blocking task, reads "today" from the injected [`Clock`] once, and runs
//! the store-level operation inside its own transaction.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Front end    │    │     Planner     │    │    Database     │
//! │   (CLI, tests)  │───▶│ (list_ops,      │───▶│   (via db/)     │
//! │                 │    │  lesson_ops,    │    │                 │
//! │                 │    │  review_ops)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and construction of [`Planner`]
//! - [`list_ops`]: list catalogue, summaries, selection
//! - [`lesson_ops`]: lesson plan generation, due lessons, lesson completion
//! - [`review_ops`]: due reviews, review completion, review rounds
//!
//! # Example
//!
//! ```rust,no_run
//! use wordman_core::{
//!     models::NewWord,
//!     params::{EnsureLessons, FinishPlan, Id, InstallList},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("wordman.db"))
//!     .build()
//!     .await?;
//!
//! let list = planner
//!     .install_list(&InstallList {
//!         name: "Basics".to_string(),
//!         words: vec![NewWord::new("apple"), NewWord::new("banana")],
//!     })
//!     .await?;
//!
//! planner.select_list(&Id { id: list.id }).await?;
//! planner
//!     .ensure_lesson_plans(&EnsureLessons { list_id: list.id, page_size: None })
//!     .await?;
//!
//! if let Some(due) = planner.due_lesson(&Id { id: list.id }).await? {
//!     planner
//!         .finish_lesson(&FinishPlan { list_id: list.id, plan_id: due.plan.id })
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use jiff::civil::Date;
use tokio::task;

use crate::{
    clock::Clock,
    db::Database,
    error::{PlannerError, Result},
};

pub mod builder;
pub mod lesson_ops;
pub mod list_ops;
pub mod review_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface for word lists, lessons and reviews.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) default_page_size: u32,
    pub(crate) busy_timeout: Duration,
}

impl Planner {
    /// Today's date according to the configured clock.
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Page size used when a caller does not choose one.
    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Runs `f` against a fresh connection on the blocking thread pool.
    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let mut db = Database::with_busy_timeout(&db_path, busy_timeout)?;
            f(&mut db)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
