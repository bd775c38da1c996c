//! Lesson plans: one page of a list, due on one calendar day.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{PlanState, ReviewRound, Word};

/// Page size used when the learner does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Smallest page size a learner may choose.
pub const MIN_PAGE_SIZE: u32 = 20;
/// Largest page size a learner may choose.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One day's batch of new words from a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LessonPlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// 1-based position of the lesson within its list
    pub lesson_number: u32,

    /// Owning list
    pub list_id: u64,

    /// Words of this lesson in study order
    pub word_ids: Vec<u64>,

    /// Day the lesson becomes due
    pub scheduled_date: Date,

    /// Day the learner finished the lesson; set once
    pub completed_date: Option<Date>,
}

impl LessonPlan {
    pub fn word_count(&self) -> u32 {
        self.word_ids.len() as u32
    }

    pub fn state(&self) -> PlanState {
        PlanState::from_completion(self.completed_date)
    }
}

/// The lesson to present today, with its words resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DueLesson {
    pub plan: LessonPlan,
    pub words: Vec<Word>,
    /// Number of due lessons including this one
    pub backlog: u32,
}

/// Everything `finish_lesson` changed, applied as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonCompletion {
    pub lesson: LessonPlan,
    pub round: ReviewRound,
}
