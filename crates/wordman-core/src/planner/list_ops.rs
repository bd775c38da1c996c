//! Word list operations for the Planner.

use super::Planner;
use crate::{
    display::ListSummaries,
    error::{PlannerError, Result},
    models::WordList,
    params::{Id, InstallList},
};

impl Planner {
    /// Installs a word list with its words in study order.
    pub async fn install_list(&self, params: &InstallList) -> Result<WordList> {
        let name = params.name.clone();
        let words = params.words.clone();

        self.with_db(move |db| db.install_list(&name, &words)).await
    }

    /// Retrieves a word list by its ID.
    pub async fn get_list(&self, params: &Id) -> Result<Option<WordList>> {
        let list_id = params.id;
        self.with_db(move |db| db.get_list(list_id)).await
    }

    /// Every word list, selected ones first, each annotated with the number
    /// of lessons and reviews outstanding today.
    pub async fn list_summaries(&self) -> Result<ListSummaries> {
        let today = self.today();
        let summaries = self.with_db(move |db| db.list_summaries(today)).await?;
        Ok(ListSummaries(summaries))
    }

    /// Marks a list as being studied and counts the activation.
    ///
    /// Lesson plans are not generated here; call
    /// [`Planner::ensure_lesson_plans`] with the learner's page size after
    /// the first selection.
    pub async fn select_list(&self, params: &Id) -> Result<WordList> {
        let list_id = params.id;
        self.with_db(move |db| db.select_list(list_id)).await
    }

    /// Stops studying a list. Plans and counters are kept.
    pub async fn deselect_list(&self, params: &Id) -> Result<WordList> {
        let list_id = params.id;
        self.with_db(move |db| db.deselect_list(list_id)).await
    }

    /// Number of words in a list.
    pub async fn list_size(&self, params: &Id) -> Result<u32> {
        let list_id = params.id;
        self.with_db(move |db| db.list_size(list_id)).await
    }

    /// Number of words across all lists.
    pub async fn count_words(&self) -> Result<u64> {
        self.with_db(|db| db.count_words()).await
    }

    /// Retrieves a word list, turning absence into `ListNotFound`.
    pub async fn require_list(&self, params: &Id) -> Result<WordList> {
        self.get_list(params)
            .await?
            .ok_or(PlannerError::ListNotFound { id: params.id })
    }
}
