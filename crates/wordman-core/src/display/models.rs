//! Display implementations for domain models.
//!
//! Everything renders as markdown so the CLI can hand it to the terminal
//! renderer unchanged.

use std::fmt;

use super::datetime::CalendarDate;
use crate::models::{
    DueLesson, DueReview, LessonPlan, ListSummary, PlanState, ReviewPlan, ReviewRound, Word,
    WordList, WordListState,
};

impl fmt::Display for WordListState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.with_icon())
    }
}

impl fmt::Display for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- State: {}", self.state)?;
        writeln!(f, "- Words: {}", self.size)?;
        writeln!(f, "- Selected: {}", if self.selected { "yes" } else { "no" })?;
        writeln!(f, "- Activations: {}", self.activation_count)?;
        writeln!(f, "- Learned: {}/{}", self.learned_count, self.size)?;
        writeln!(f, "- Fully reviewed: {}/{}", self.finished_count, self.size)?;
        Ok(())
    }
}

impl fmt::Display for ListSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = &self.list;
        let marker = if list.selected { " ★" } else { "" };

        writeln!(f, "## {} (ID: {}){marker}", list.name, list.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Progress**: {} learned, {} fully reviewed of {} words",
            list.learned_count, list.finished_count, list.size
        )?;
        if self.to_learn_count > 0 {
            writeln!(f, "- **To learn**: {} lessons", self.to_learn_count)?;
        }
        if self.to_review_count > 0 {
            writeln!(f, "- **To review**: {} reviews", self.to_review_count)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}**", self.spelling)?;
        if let Some(phonetic) = &self.phonetic {
            write!(f, " [{phonetic}]")?;
        }
        if let Some(definition) = &self.definition {
            write!(f, ": {definition}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for LessonPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### Lesson {} (ID: {}, {})",
            self.lesson_number,
            self.id,
            self.state()
        )?;
        writeln!(f)?;
        writeln!(f, "- Words: {}", self.word_count())?;
        writeln!(f, "- Scheduled: {}", CalendarDate(&self.scheduled_date))?;
        if let Some(completed) = &self.completed_date {
            writeln!(f, "- Completed: {}", CalendarDate(completed))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ReviewPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### Review {}/5 of lesson {} (ID: {}, {})",
            self.stage_index,
            self.lesson_number,
            self.id,
            self.state()
        )?;
        writeln!(f)?;
        writeln!(f, "- Round: {}", self.round_id)?;
        writeln!(f, "- Words: {}", self.word_count())?;
        writeln!(f, "- Scheduled: {}", CalendarDate(&self.scheduled_date))?;
        if let Some(completed) = &self.completed_date {
            writeln!(f, "- Completed: {}", CalendarDate(completed))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ReviewRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# Review round {} (lesson {}, {}/{} stages done)",
            self.id,
            self.lesson_number,
            self.completed_stages(),
            self.plans.len()
        )?;
        writeln!(f)?;
        for plan in &self.plans {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DueLesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.backlog > 1 {
            writeln!(f, "{} lessons to learn.", self.backlog)?;
            writeln!(f)?;
        }
        write!(f, "{}", self.plan)?;
        for word in &self.words {
            write!(f, "{word}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DueReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.backlog > 1 {
            writeln!(f, "{} reviews to do.", self.backlog)?;
            writeln!(f)?;
        }
        write!(f, "{}", self.plan)?;
        for word in &self.words {
            write!(f, "{word}")?;
        }
        Ok(())
    }
}
