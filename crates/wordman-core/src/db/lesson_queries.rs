//! Lesson plan generation, due-lesson queries and lesson completion.

use jiff::{civil::Date, ToSpan};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::utils::{date_column, encode_word_ids, optional_date_column, word_ids_column};
use crate::{
    error::{DatabaseResultExt, PlanKind, PlannerError, Result},
    models::{
        lesson::{MAX_PAGE_SIZE, MIN_PAGE_SIZE},
        DueLesson, LessonCompletion, LessonPlan,
    },
};

const LESSON_COLUMNS: &str =
    "id, lesson_number, list_id, word_ids, scheduled_date, completed_date";
const COUNT_LESSONS_SQL: &str = "SELECT COUNT(*) FROM lesson_plans WHERE list_id = ?1";
const INSERT_LESSON_SQL: &str = "INSERT INTO lesson_plans (list_id, lesson_number, word_ids, scheduled_date) VALUES (?1, ?2, ?3, ?4)";
const COUNT_DUE_LESSONS_SQL: &str = "SELECT COUNT(*) FROM lesson_plans WHERE list_id = ?1 AND completed_date IS NULL AND scheduled_date <= ?2";
const MARK_LESSON_DONE_SQL: &str =
    "UPDATE lesson_plans SET completed_date = ?1 WHERE id = ?2 AND completed_date IS NULL";

/// Rejects page sizes outside the learner-configurable range.
pub fn validate_page_size(page_size: u32) -> Result<()> {
    if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
        Ok(())
    } else {
        Err(PlannerError::InvalidRange {
            field: "page_size".to_string(),
            value: i64::from(page_size),
            min: i64::from(MIN_PAGE_SIZE),
            max: i64::from(MAX_PAGE_SIZE),
        })
    }
}

impl super::Database {
    /// Helper function to construct a LessonPlan from a database row
    fn build_lesson_from_row(row: &Row) -> rusqlite::Result<LessonPlan> {
        Ok(LessonPlan {
            id: row.get::<_, i64>(0)? as u64,
            lesson_number: row.get::<_, i64>(1)? as u32,
            list_id: row.get::<_, i64>(2)? as u64,
            word_ids: word_ids_column(row, 3)?,
            scheduled_date: date_column(row, 4)?,
            completed_date: optional_date_column(row, 5)?,
        })
    }

    fn lesson_in(conn: &Connection, list_id: u64, id: u64) -> Result<Option<LessonPlan>> {
        conn.query_row(
            &format!("SELECT {LESSON_COLUMNS} FROM lesson_plans WHERE id = ?1 AND list_id = ?2"),
            params![id as i64, list_id as i64],
            Self::build_lesson_from_row,
        )
        .optional()
        .db_context("Failed to query lesson plan")
    }

    /// Cuts the list into pages of `page_size` words and schedules one
    /// lesson per page, the first due on `today` and each following page one
    /// day later.
    ///
    /// Does nothing when the list already has lesson plans. The check and the
    /// inserts share one write transaction, so a retry or a concurrent caller
    /// can never generate a second set.
    ///
    /// Returns every lesson plan of the list, ordered by lesson number.
    pub fn ensure_lesson_plans(
        &mut self,
        list_id: u64,
        page_size: u32,
        today: Date,
    ) -> Result<Vec<LessonPlan>> {
        validate_page_size(page_size)?;

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        Self::ensure_list_exists(&tx, list_id)?;

        let existing: i64 = tx
            .query_row(COUNT_LESSONS_SQL, params![list_id as i64], |row| row.get(0))
            .db_context("Failed to count lesson plans")?;

        if existing > 0 {
            debug!("Word list {list_id} already has {existing} lesson plans");
        } else {
            let mut offset = 0u32;
            let mut lesson_number = 1u32;
            loop {
                let page = Self::word_page_in(&tx, list_id, offset, page_size)?;
                if page.is_empty() {
                    break;
                }

                let scheduled = today
                    .checked_add(i64::from(lesson_number - 1).days())
                    .map_err(|e| PlannerError::invalid_input("scheduled_date", e.to_string()))?;

                tx.execute(
                    INSERT_LESSON_SQL,
                    params![
                        list_id as i64,
                        i64::from(lesson_number),
                        encode_word_ids(&page),
                        scheduled.to_string()
                    ],
                )
                .db_context("Failed to insert lesson plan")?;

                offset += page.len() as u32;
                lesson_number += 1;
                if (page.len() as u32) < page_size {
                    break;
                }
            }
            info!(
                "Generated {} lesson plans of up to {page_size} words for list {list_id}",
                lesson_number - 1
            );
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_lesson_plans(list_id)
    }

    /// All lesson plans of a list ordered by lesson number.
    pub fn get_lesson_plans(&self, list_id: u64) -> Result<Vec<LessonPlan>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {LESSON_COLUMNS} FROM lesson_plans WHERE list_id = ?1 ORDER BY lesson_number"
            ))
            .db_context("Failed to prepare query")?;

        let plans = stmt
            .query_map(params![list_id as i64], Self::build_lesson_from_row)
            .db_context("Failed to query lesson plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch lesson plans")?;
        Ok(plans)
    }

    /// A single lesson plan of a list.
    pub fn get_lesson_plan(&self, list_id: u64, id: u64) -> Result<Option<LessonPlan>> {
        Self::lesson_in(&self.connection, list_id, id)
    }

    /// The earliest pending lesson scheduled on or before `today`, with its
    /// words. `None` means the learner is caught up.
    pub fn due_lesson(&self, list_id: u64, today: Date) -> Result<Option<DueLesson>> {
        Self::ensure_list_exists(&self.connection, list_id)?;

        let plan = self
            .connection
            .query_row(
                &format!(
                    "SELECT {LESSON_COLUMNS} FROM lesson_plans \
                     WHERE list_id = ?1 AND completed_date IS NULL AND scheduled_date <= ?2 \
                     ORDER BY scheduled_date, lesson_number LIMIT 1"
                ),
                params![list_id as i64, today.to_string()],
                Self::build_lesson_from_row,
            )
            .optional()
            .db_context("Failed to query due lesson")?;

        let Some(plan) = plan else {
            return Ok(None);
        };

        let backlog = self.count_due_lessons(list_id, today)?;
        let words = self.words_by_ids(list_id, &plan.word_ids)?;
        Ok(Some(DueLesson {
            plan,
            words,
            backlog,
        }))
    }

    /// Pending lessons scheduled on or before `today`.
    pub fn count_due_lessons(&self, list_id: u64, today: Date) -> Result<u32> {
        Self::ensure_list_exists(&self.connection, list_id)?;

        let count: i64 = self
            .connection
            .query_row(
                COUNT_DUE_LESSONS_SQL,
                params![list_id as i64, today.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to count due lessons")?;
        Ok(count as u32)
    }

    /// Completes a lesson on `today`: stamps the plan, adds its words to the
    /// list's learned count and schedules its review round, all in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// `LessonNotFound` when the plan does not belong to the list and
    /// `AlreadyDone` when it was completed before.
    pub fn finish_lesson(
        &mut self,
        list_id: u64,
        plan_id: u64,
        today: Date,
    ) -> Result<LessonCompletion> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut lesson = Self::lesson_in(&tx, list_id, plan_id)?.ok_or(
            PlannerError::LessonNotFound {
                list_id,
                id: plan_id,
            },
        )?;
        if lesson.completed_date.is_some() {
            return Err(PlannerError::AlreadyDone {
                kind: PlanKind::Lesson,
                id: plan_id,
            });
        }

        let rows = tx
            .execute(MARK_LESSON_DONE_SQL, params![today.to_string(), plan_id as i64])
            .db_context("Failed to complete lesson plan")?;
        if rows == 0 {
            return Err(PlannerError::AlreadyDone {
                kind: PlanKind::Lesson,
                id: plan_id,
            });
        }
        lesson.completed_date = Some(today);

        Self::increment_learned(&tx, list_id, lesson.word_count())?;
        let round = Self::schedule_review_round_in(
            &tx,
            lesson.lesson_number,
            list_id,
            &lesson.word_ids,
            today,
        )?;

        tx.commit().db_context("Failed to commit transaction")?;
        info!(
            "Finished lesson {} of list {list_id}; review round {} scheduled",
            lesson.lesson_number, round.id
        );

        Ok(LessonCompletion { lesson, round })
    }
}
