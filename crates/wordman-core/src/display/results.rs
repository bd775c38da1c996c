//! Result wrapper types for displaying completion outcomes.

use std::fmt;

use super::datetime::CalendarDate;
use crate::models::{LessonCompletion, ReviewCompletion};

impl fmt::Display for LessonCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Finished lesson {} ({} words).",
            self.lesson.lesson_number,
            self.lesson.word_count()
        )?;
        writeln!(f)?;
        writeln!(f, "## Reviews scheduled (round {})", self.round.id)?;
        writeln!(f)?;
        for plan in &self.round.plans {
            writeln!(
                f,
                "- Stage {}: {}",
                plan.stage_index,
                CalendarDate(&plan.scheduled_date)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ReviewCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Finished review {}/5 of lesson {}.",
            self.review.stage_index, self.review.lesson_number
        )?;
        if self.round_finished {
            writeln!(f)?;
            writeln!(
                f,
                "Round {} complete: {} words fully reviewed.",
                self.review.round_id,
                self.review.word_count()
            )?;
        }
        Ok(())
    }
}
