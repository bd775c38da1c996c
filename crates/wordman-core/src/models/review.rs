//! Review rounds and their five spaced-repetition stages.

use jiff::{civil::Date, ToSpan};
use serde::{Deserialize, Serialize};

use super::{PlanState, Word};
use crate::error::{PlannerError, Result};

/// Number of stages in every review round.
pub const REVIEW_STAGES: usize = 5;

/// Day gap between consecutive stages. Stage 1 is one day after the lesson
/// was completed; each later stage adds its gap to the previous stage's date,
/// giving offsets of 1, 2, 4, 7 and 15 days.
pub const STAGE_GAPS: [i32; REVIEW_STAGES] = [1, 1, 2, 3, 8];

/// Scheduled dates of the five stages of a round started on `completed`.
pub fn stage_dates(completed: Date) -> Result<[Date; REVIEW_STAGES]> {
    let mut dates = [completed; REVIEW_STAGES];
    let mut current = completed;
    for (slot, gap) in dates.iter_mut().zip(STAGE_GAPS) {
        current = current
            .checked_add(gap.days())
            .map_err(|e| PlannerError::invalid_input("scheduled_date", e.to_string()))?;
        *slot = current;
    }
    Ok(dates)
}

/// One stage of a review round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewPlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Lesson number of the lesson that started the round
    pub lesson_number: u32,

    /// Stage within the round, 1..=5
    pub stage_index: u8,

    /// Round shared by the five stages
    pub round_id: u64,

    /// Owning list
    pub list_id: u64,

    /// Words to review, copied from the lesson
    pub word_ids: Vec<u64>,

    /// Day the review becomes due
    pub scheduled_date: Date,

    /// Day the learner finished the review; set once
    pub completed_date: Option<Date>,
}

impl ReviewPlan {
    pub fn word_count(&self) -> u32 {
        self.word_ids.len() as u32
    }

    pub fn state(&self) -> PlanState {
        PlanState::from_completion(self.completed_date)
    }
}

/// The five review plans generated together when a lesson completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRound {
    pub id: u64,
    pub list_id: u64,
    pub lesson_number: u32,
    pub word_count: u32,
    /// Stages ordered by `stage_index`
    pub plans: Vec<ReviewPlan>,
}

impl ReviewRound {
    pub fn completed_stages(&self) -> usize {
        self.plans
            .iter()
            .filter(|plan| plan.completed_date.is_some())
            .count()
    }

    /// A round is finished once every stage carries a completion date.
    pub fn is_finished(&self) -> bool {
        self.plans.len() == REVIEW_STAGES && self.completed_stages() == REVIEW_STAGES
    }
}

/// The review to present today, with its words resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DueReview {
    pub plan: ReviewPlan,
    pub words: Vec<Word>,
    /// Number of due reviews including this one
    pub backlog: u32,
}

/// Result of completing one review stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewCompletion {
    pub review: ReviewPlan,
    /// True only on the call that completed the last open stage
    pub round_finished: bool,
}
