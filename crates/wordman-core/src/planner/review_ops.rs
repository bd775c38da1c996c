//! Review operations for the Planner.

use super::Planner;
use crate::{
    display::ReviewPlans,
    error::{PlannerError, Result},
    models::{DueReview, ReviewCompletion, ReviewRound},
    params::{FinishPlan, Id},
};

impl Planner {
    /// The review to do today, if any.
    pub async fn due_review(&self, params: &Id) -> Result<Option<DueReview>> {
        let list_id = params.id;
        let today = self.today();
        self.with_db(move |db| db.due_review(list_id, today)).await
    }

    /// Number of reviews due today, overdue ones included.
    pub async fn count_due_reviews(&self, params: &Id) -> Result<u32> {
        let list_id = params.id;
        let today = self.today();
        self.with_db(move |db| db.count_due_reviews(list_id, today))
            .await
    }

    /// Completes one review stage today. The result reports whether this
    /// call finished the whole round.
    pub async fn finish_review(&self, params: &FinishPlan) -> Result<ReviewCompletion> {
        let list_id = params.list_id;
        let plan_id = params.plan_id;
        let today = self.today();
        self.with_db(move |db| db.finish_review(list_id, plan_id, today))
            .await
    }

    /// A review round with its five stages.
    pub async fn review_round(&self, params: &Id) -> Result<ReviewRound> {
        let round_id = params.id;
        self.with_db(move |db| db.get_review_round(round_id))
            .await?
            .ok_or(PlannerError::RoundNotFound { id: round_id })
    }

    /// Every review plan of a list, ordered by scheduled date.
    pub async fn review_plans(&self, params: &Id) -> Result<ReviewPlans> {
        let list_id = params.id;
        let plans = self
            .with_db(move |db| {
                db.check_list(list_id)?;
                db.get_review_plans(list_id)
            })
            .await?;
        Ok(ReviewPlans(plans))
    }
}
