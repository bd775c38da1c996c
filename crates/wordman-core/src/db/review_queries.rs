//! Review round generation, due-review queries and review completion.

use jiff::civil::Date;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::utils::{date_column, encode_word_ids, optional_date_column, word_ids_column};
use crate::{
    error::{DatabaseResultExt, PlanKind, PlannerError, Result},
    models::{
        review::{stage_dates, REVIEW_STAGES},
        DueReview, ReviewCompletion, ReviewPlan, ReviewRound,
    },
};

const REVIEW_COLUMNS: &str = "id, lesson_number, stage_index, round_id, list_id, word_ids, scheduled_date, completed_date";
const INSERT_ROUND_SQL: &str = "INSERT INTO review_rounds (list_id, lesson_number, word_count, created_date) VALUES (?1, ?2, ?3, ?4)";
const INSERT_REVIEW_SQL: &str = "INSERT INTO review_plans (round_id, list_id, lesson_number, stage_index, word_ids, scheduled_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_ROUND_SQL: &str =
    "SELECT id, list_id, lesson_number, word_count FROM review_rounds WHERE id = ?1";
const COUNT_DUE_REVIEWS_SQL: &str = "SELECT COUNT(*) FROM review_plans WHERE list_id = ?1 AND completed_date IS NULL AND scheduled_date <= ?2";
const MARK_REVIEW_DONE_SQL: &str =
    "UPDATE review_plans SET completed_date = ?1 WHERE id = ?2 AND completed_date IS NULL";
const COUNT_COMPLETED_STAGES_SQL: &str =
    "SELECT COUNT(*) FROM review_plans WHERE round_id = ?1 AND completed_date IS NOT NULL";
const SELECT_ROUND_WORD_COUNT_SQL: &str = "SELECT word_count FROM review_rounds WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a ReviewPlan from a database row
    fn build_review_from_row(row: &Row) -> rusqlite::Result<ReviewPlan> {
        Ok(ReviewPlan {
            id: row.get::<_, i64>(0)? as u64,
            lesson_number: row.get::<_, i64>(1)? as u32,
            stage_index: row.get::<_, i64>(2)? as u8,
            round_id: row.get::<_, i64>(3)? as u64,
            list_id: row.get::<_, i64>(4)? as u64,
            word_ids: word_ids_column(row, 5)?,
            scheduled_date: date_column(row, 6)?,
            completed_date: optional_date_column(row, 7)?,
        })
    }

    /// Inserts a round and its five stages on `conn`, which must be inside
    /// the caller's transaction.
    pub(crate) fn schedule_review_round_in(
        conn: &Connection,
        lesson_number: u32,
        list_id: u64,
        word_ids: &[u64],
        completion_date: Date,
    ) -> Result<ReviewRound> {
        let dates = stage_dates(completion_date)?;
        let word_count = word_ids.len() as u32;

        conn.execute(
            INSERT_ROUND_SQL,
            params![
                list_id as i64,
                i64::from(lesson_number),
                i64::from(word_count),
                completion_date.to_string()
            ],
        )
        .db_context("Failed to insert review round")?;
        let round_id = conn.last_insert_rowid() as u64;

        let encoded = encode_word_ids(word_ids);
        let mut plans = Vec::with_capacity(REVIEW_STAGES);
        for (index, scheduled_date) in dates.into_iter().enumerate() {
            let stage_index = index as u8 + 1;
            conn.execute(
                INSERT_REVIEW_SQL,
                params![
                    round_id as i64,
                    list_id as i64,
                    i64::from(lesson_number),
                    i64::from(stage_index),
                    &encoded,
                    scheduled_date.to_string()
                ],
            )
            .db_context("Failed to insert review plan")?;

            plans.push(ReviewPlan {
                id: conn.last_insert_rowid() as u64,
                lesson_number,
                stage_index,
                round_id,
                list_id,
                word_ids: word_ids.to_vec(),
                scheduled_date,
                completed_date: None,
            });
        }

        debug!("Scheduled review round {round_id} for lesson {lesson_number} of list {list_id}");
        Ok(ReviewRound {
            id: round_id,
            list_id,
            lesson_number,
            word_count,
            plans,
        })
    }

    /// Generates a five-stage review round for words completed on
    /// `completion_date`. Either all five stages are stored or none are.
    pub fn schedule_review_round(
        &mut self,
        lesson_number: u32,
        list_id: u64,
        word_ids: &[u64],
        completion_date: Date,
    ) -> Result<ReviewRound> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::ensure_list_exists(&tx, list_id)?;
        let round =
            Self::schedule_review_round_in(&tx, lesson_number, list_id, word_ids, completion_date)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(round)
    }

    /// A review round with its stages ordered by stage index.
    pub fn get_review_round(&self, round_id: u64) -> Result<Option<ReviewRound>> {
        let header = self
            .connection
            .query_row(SELECT_ROUND_SQL, params![round_id as i64], |row| {
                Ok((
                    row.get::<_, i64>(1)? as u64,
                    row.get::<_, i64>(2)? as u32,
                    row.get::<_, i64>(3)? as u32,
                ))
            })
            .optional()
            .db_context("Failed to query review round")?;

        let Some((list_id, lesson_number, word_count)) = header else {
            return Ok(None);
        };

        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {REVIEW_COLUMNS} FROM review_plans WHERE round_id = ?1 ORDER BY stage_index"
            ))
            .db_context("Failed to prepare query")?;
        let plans = stmt
            .query_map(params![round_id as i64], Self::build_review_from_row)
            .db_context("Failed to query review plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch review plans")?;

        Ok(Some(ReviewRound {
            id: round_id,
            list_id,
            lesson_number,
            word_count,
            plans,
        }))
    }

    /// All review plans of a list, ordered by scheduled date then stage.
    pub fn get_review_plans(&self, list_id: u64) -> Result<Vec<ReviewPlan>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {REVIEW_COLUMNS} FROM review_plans WHERE list_id = ?1 \
                 ORDER BY scheduled_date, round_id, stage_index"
            ))
            .db_context("Failed to prepare query")?;

        let plans = stmt
            .query_map(params![list_id as i64], Self::build_review_from_row)
            .db_context("Failed to query review plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch review plans")?;
        Ok(plans)
    }

    /// The earliest pending review scheduled on or before `today`, with its
    /// words. `None` means nothing is due.
    pub fn due_review(&self, list_id: u64, today: Date) -> Result<Option<DueReview>> {
        Self::ensure_list_exists(&self.connection, list_id)?;

        let plan = self
            .connection
            .query_row(
                &format!(
                    "SELECT {REVIEW_COLUMNS} FROM review_plans \
                     WHERE list_id = ?1 AND completed_date IS NULL AND scheduled_date <= ?2 \
                     ORDER BY scheduled_date, round_id, stage_index LIMIT 1"
                ),
                params![list_id as i64, today.to_string()],
                Self::build_review_from_row,
            )
            .optional()
            .db_context("Failed to query due review")?;

        let Some(plan) = plan else {
            return Ok(None);
        };

        let backlog = self.count_due_reviews(list_id, today)?;
        let words = self.words_by_ids(list_id, &plan.word_ids)?;
        Ok(Some(DueReview {
            plan,
            words,
            backlog,
        }))
    }

    /// Pending reviews scheduled on or before `today`.
    pub fn count_due_reviews(&self, list_id: u64, today: Date) -> Result<u32> {
        Self::ensure_list_exists(&self.connection, list_id)?;

        let count: i64 = self
            .connection
            .query_row(
                COUNT_DUE_REVIEWS_SQL,
                params![list_id as i64, today.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to count due reviews")?;
        Ok(count as u32)
    }

    /// Completes one review stage on `today`.
    ///
    /// After stamping the plan, the completed stages of its round are
    /// counted; when all five are done the round's words are added to the
    /// list's finished count. A stage can only be completed once, so the
    /// increment happens exactly once per round.
    ///
    /// # Errors
    ///
    /// `ReviewNotFound` when the plan does not belong to the list and
    /// `AlreadyDone` when it was completed before.
    pub fn finish_review(
        &mut self,
        list_id: u64,
        plan_id: u64,
        today: Date,
    ) -> Result<ReviewCompletion> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut review = tx
            .query_row(
                &format!("SELECT {REVIEW_COLUMNS} FROM review_plans WHERE id = ?1 AND list_id = ?2"),
                params![plan_id as i64, list_id as i64],
                Self::build_review_from_row,
            )
            .optional()
            .db_context("Failed to query review plan")?
            .ok_or(PlannerError::ReviewNotFound {
                list_id,
                id: plan_id,
            })?;
        if review.completed_date.is_some() {
            return Err(PlannerError::AlreadyDone {
                kind: PlanKind::Review,
                id: plan_id,
            });
        }

        let rows = tx
            .execute(MARK_REVIEW_DONE_SQL, params![today.to_string(), plan_id as i64])
            .db_context("Failed to complete review plan")?;
        if rows == 0 {
            return Err(PlannerError::AlreadyDone {
                kind: PlanKind::Review,
                id: plan_id,
            });
        }
        review.completed_date = Some(today);

        let completed: i64 = tx
            .query_row(
                COUNT_COMPLETED_STAGES_SQL,
                params![review.round_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to count completed stages")?;

        let round_finished = completed as usize == REVIEW_STAGES;
        if round_finished {
            let word_count: i64 = tx
                .query_row(
                    SELECT_ROUND_WORD_COUNT_SQL,
                    params![review.round_id as i64],
                    |row| row.get(0),
                )
                .optional()
                .db_context("Failed to query review round")?
                .ok_or(PlannerError::RoundNotFound {
                    id: review.round_id,
                })?;
            Self::increment_finished(&tx, list_id, word_count as u32)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        if round_finished {
            info!(
                "Review round {} of list {list_id} finished; {} words fully reviewed",
                review.round_id,
                review.word_count()
            );
        } else {
            debug!(
                "Finished review stage {} of round {} ({completed}/{REVIEW_STAGES})",
                review.stage_index, review.round_id
            );
        }

        Ok(ReviewCompletion {
            review,
            round_finished,
        })
    }
}
