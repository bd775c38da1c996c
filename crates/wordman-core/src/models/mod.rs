//! Data models for word lists, lessons and review rounds.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation apart from the data.
//!
//! Both plan kinds follow the same one-way lifecycle:
//!
//! ```text
//! Scheduled ──finish──▶ Completed
//! ```
//!
//! A plan is created with a scheduled date and no completion date, and the
//! completion date is written exactly once.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub mod lesson;
pub mod review;
pub mod word;
pub mod word_list;


pub use lesson::{DueLesson, LessonCompletion, LessonPlan};
pub use review::{DueReview, ReviewCompletion, ReviewPlan, ReviewRound};
pub use word::{NewWord, Word};
pub use word_list::{ListSummary, WordList, WordListState};

/// Lifecycle state shared by lesson and review plans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanState {
    /// Waiting for the learner
    Scheduled,
    /// Finished; terminal
    Completed,
}

impl PlanState {
    pub(crate) fn from_completion(completed_date: Option<Date>) -> Self {
        if completed_date.is_some() {
            PlanState::Completed
        } else {
            PlanState::Scheduled
        }
    }

    /// Status with an icon, used by every display context.
    ///
    /// ```rust
    /// use wordman_core::models::PlanState;
    ///
    /// assert_eq!(PlanState::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(PlanState::Scheduled.with_icon(), "○ Scheduled");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            PlanState::Completed => "✓ Completed",
            PlanState::Scheduled => "○ Scheduled",
        }
    }
}
