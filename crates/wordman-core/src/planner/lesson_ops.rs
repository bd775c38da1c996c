//! Lesson operations for the Planner.

use super::Planner;
use crate::{
    display::LessonPlans,
    error::Result,
    models::{DueLesson, LessonCompletion, LessonPlan},
    params::{EnsureLessons, FinishPlan, Id},
};

impl Planner {
    /// Generates the list's lesson plans unless it already has some.
    ///
    /// The first lesson is due today and every following one a day later.
    /// Uses the planner's default page size when none is given.
    pub async fn ensure_lesson_plans(&self, params: &EnsureLessons) -> Result<Vec<LessonPlan>> {
        let list_id = params.list_id;
        let page_size = params.page_size.unwrap_or(self.default_page_size);
        let today = self.today();

        self.with_db(move |db| db.ensure_lesson_plans(list_id, page_size, today))
            .await
    }

    /// All lesson plans of a list ordered by lesson number.
    pub async fn lesson_plans(&self, params: &Id) -> Result<LessonPlans> {
        let list_id = params.id;
        let plans = self
            .with_db(move |db| {
                db.check_list(list_id)?;
                db.get_lesson_plans(list_id)
            })
            .await?;
        Ok(LessonPlans(plans))
    }

    /// The lesson to study today, if any.
    pub async fn due_lesson(&self, params: &Id) -> Result<Option<DueLesson>> {
        let list_id = params.id;
        let today = self.today();
        self.with_db(move |db| db.due_lesson(list_id, today)).await
    }

    /// Number of lessons due today, overdue ones included.
    pub async fn count_due_lessons(&self, params: &Id) -> Result<u32> {
        let list_id = params.id;
        let today = self.today();
        self.with_db(move |db| db.count_due_lessons(list_id, today))
            .await
    }

    /// Completes a lesson today and schedules its review round.
    pub async fn finish_lesson(&self, params: &FinishPlan) -> Result<LessonCompletion> {
        let list_id = params.list_id;
        let plan_id = params.plan_id;
        let today = self.today();
        self.with_db(move |db| db.finish_lesson(list_id, plan_id, today))
            .await
    }
}
