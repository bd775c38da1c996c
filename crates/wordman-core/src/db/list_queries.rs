//! Word list catalogue, word lookup and per-list aggregate counters.

use jiff::{civil::Date, Timestamp};
use log::{debug, info, warn};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{ListSummary, NewWord, Word, WordList, WordListState},
};

const LIST_COLUMNS: &str =
    "id, name, size, state, activation_count, selected, learned_count, finished_count";
const CHECK_LIST_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM word_lists WHERE id = ?1)";
const CHECK_LIST_NAME_SQL: &str = "SELECT EXISTS(SELECT 1 FROM word_lists WHERE name = ?1)";
const INSERT_LIST_SQL: &str =
    "INSERT INTO word_lists (name, size, state, created_at) VALUES (?1, ?2, ?3, ?4)";
const INSERT_WORD_SQL: &str = "INSERT INTO words (list_id, word_id, position, spelling, phonetic, definition) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_LIST_SIZE_SQL: &str = "SELECT size FROM word_lists WHERE id = ?1";
const COUNT_ALL_WORDS_SQL: &str = "SELECT COUNT(*) FROM words";
const SELECT_WORD_PAGE_SQL: &str =
    "SELECT word_id FROM words WHERE list_id = ?1 ORDER BY position LIMIT ?2 OFFSET ?3";
const SELECT_WORD_SQL: &str = "SELECT word_id, list_id, position, spelling, phonetic, definition FROM words WHERE list_id = ?1 AND word_id = ?2";
const SELECT_LIST_SQL: &str = "UPDATE word_lists SET selected = 1, activation_count = activation_count + 1 WHERE id = ?1";
const DESELECT_LIST_SQL: &str = "UPDATE word_lists SET selected = 0 WHERE id = ?1";
const INCREMENT_LEARNED_SQL: &str =
    "UPDATE word_lists SET learned_count = learned_count + ?1 WHERE id = ?2";
const INCREMENT_FINISHED_SQL: &str =
    "UPDATE word_lists SET finished_count = finished_count + ?1 WHERE id = ?2";
const LIST_SUMMARIES_SQL: &str = "SELECT l.id, l.name, l.size, l.state, l.activation_count, l.selected, l.learned_count, l.finished_count, \
     (SELECT COUNT(*) FROM lesson_plans p WHERE p.list_id = l.id AND p.completed_date IS NULL AND p.scheduled_date <= ?1), \
     (SELECT COUNT(*) FROM review_plans r WHERE r.list_id = l.id AND r.completed_date IS NULL AND r.scheduled_date <= ?1) \
     FROM word_lists l ORDER BY l.selected DESC, l.id ASC";

impl super::Database {
    /// Helper function to construct a WordList from the leading columns of a
    /// row in `LIST_COLUMNS` order.
    fn build_list_from_row(row: &Row) -> rusqlite::Result<WordList> {
        let state_str: String = row.get(3)?;
        let state = state_str.parse::<WordListState>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("Invalid word list state: {state_str}").into(),
            )
        })?;

        Ok(WordList {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            size: row.get::<_, i64>(2)? as u32,
            state,
            activation_count: row.get::<_, i64>(4)? as u32,
            selected: row.get(5)?,
            learned_count: row.get::<_, i64>(6)? as u32,
            finished_count: row.get::<_, i64>(7)? as u32,
        })
    }

    /// Returns `ListNotFound` unless the list exists.
    pub(crate) fn ensure_list_exists(conn: &Connection, list_id: u64) -> Result<()> {
        let exists: bool = conn
            .query_row(CHECK_LIST_EXISTS_SQL, params![list_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check word list existence")?;

        if exists {
            Ok(())
        } else {
            Err(PlannerError::ListNotFound { id: list_id })
        }
    }

    /// Returns `ListNotFound` unless the list exists.
    pub fn check_list(&self, list_id: u64) -> Result<()> {
        Self::ensure_list_exists(&self.connection, list_id)
    }

    /// Installs a word list and all of its words in one transaction.
    ///
    /// Words get ids `1..=n` in the order given, which is also the order
    /// lessons are cut from.
    pub fn install_list(&mut self, name: &str, words: &[NewWord]) -> Result<WordList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::invalid_input("name", "List name cannot be empty"));
        }
        if let Some(position) = words.iter().position(|w| w.spelling.trim().is_empty()) {
            return Err(PlannerError::invalid_input(
                "words",
                format!("Word at position {position} has an empty spelling"),
            ));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let taken: bool = tx
            .query_row(CHECK_LIST_NAME_SQL, params![name], |row| row.get(0))
            .db_context("Failed to check word list name")?;
        if taken {
            return Err(PlannerError::invalid_input(
                "name",
                format!("A word list named '{name}' already exists"),
            ));
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_LIST_SQL,
            params![
                name,
                words.len() as i64,
                WordListState::Installed.as_str(),
                &now
            ],
        )
        .db_context("Failed to insert word list")?;
        let list_id = tx.last_insert_rowid() as u64;

        {
            let mut stmt = tx
                .prepare(INSERT_WORD_SQL)
                .db_context("Failed to prepare word insert")?;
            for (position, word) in words.iter().enumerate() {
                stmt.execute(params![
                    list_id as i64,
                    position as i64 + 1,
                    position as i64,
                    word.spelling.trim(),
                    word.phonetic.as_deref(),
                    word.definition.as_deref(),
                ])
                .db_context("Failed to insert word")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        info!("Installed word list {list_id} '{name}' with {} words", words.len());

        Ok(WordList {
            id: list_id,
            name: name.to_string(),
            size: words.len() as u32,
            state: WordListState::Installed,
            activation_count: 0,
            selected: false,
            learned_count: 0,
            finished_count: 0,
        })
    }

    /// Retrieves a word list by its ID.
    pub fn get_list(&self, id: u64) -> Result<Option<WordList>> {
        self.connection
            .query_row(
                &format!("SELECT {LIST_COLUMNS} FROM word_lists WHERE id = ?1"),
                params![id as i64],
                Self::build_list_from_row,
            )
            .optional()
            .db_context("Failed to query word list")
    }

    /// Lists every word list, selected ones first.
    pub fn list_lists(&self) -> Result<Vec<WordList>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {LIST_COLUMNS} FROM word_lists ORDER BY selected DESC, id ASC"
            ))
            .db_context("Failed to prepare query")?;

        let lists = stmt
            .query_map([], Self::build_list_from_row)
            .db_context("Failed to query word lists")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch word lists")?;
        Ok(lists)
    }

    /// Every word list annotated with the lessons and reviews due on
    /// `today`. Selected lists come first, then ascending id.
    pub fn list_summaries(&self, today: Date) -> Result<Vec<ListSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map(params![today.to_string()], |row| {
                Ok(ListSummary {
                    list: Self::build_list_from_row(row)?,
                    to_learn_count: row.get::<_, i64>(8)? as u32,
                    to_review_count: row.get::<_, i64>(9)? as u32,
                })
            })
            .db_context("Failed to query list summaries")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch list summaries")?;
        Ok(summaries)
    }

    /// Marks a list selected and counts the activation. Other lists keep
    /// their selection.
    pub fn select_list(&mut self, id: u64) -> Result<WordList> {
        let rows = self
            .connection
            .execute(SELECT_LIST_SQL, params![id as i64])
            .db_context("Failed to select word list")?;
        if rows == 0 {
            return Err(PlannerError::ListNotFound { id });
        }
        debug!("Selected word list {id}");
        self.get_list(id)?.ok_or(PlannerError::ListNotFound { id })
    }

    /// Clears the selection flag of a list. Counters are left untouched.
    pub fn deselect_list(&mut self, id: u64) -> Result<WordList> {
        let rows = self
            .connection
            .execute(DESELECT_LIST_SQL, params![id as i64])
            .db_context("Failed to deselect word list")?;
        if rows == 0 {
            return Err(PlannerError::ListNotFound { id });
        }
        self.get_list(id)?.ok_or(PlannerError::ListNotFound { id })
    }

    /// Number of words in a list.
    pub fn list_size(&self, id: u64) -> Result<u32> {
        self.connection
            .query_row(SELECT_LIST_SIZE_SQL, params![id as i64], |row| {
                row.get::<_, i64>(0)
            })
            .optional()
            .db_context("Failed to query word list size")?
            .map(|size| size as u32)
            .ok_or(PlannerError::ListNotFound { id })
    }

    /// Number of words across every list.
    pub fn count_words(&self) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(COUNT_ALL_WORDS_SQL, [], |row| row.get(0))
            .db_context("Failed to count words")?;
        Ok(count as u64)
    }

    /// Word ids of a list in study order, `limit` of them starting at
    /// `offset`.
    pub fn word_page(&self, list_id: u64, offset: u32, limit: u32) -> Result<Vec<u64>> {
        Self::word_page_in(&self.connection, list_id, offset, limit)
    }

    pub(crate) fn word_page_in(
        conn: &Connection,
        list_id: u64,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<u64>> {
        let mut stmt = conn
            .prepare_cached(SELECT_WORD_PAGE_SQL)
            .db_context("Failed to prepare word page query")?;

        let ids = stmt
            .query_map(
                params![list_id as i64, i64::from(limit), i64::from(offset)],
                |row| row.get::<_, i64>(0).map(|id| id as u64),
            )
            .db_context("Failed to query word page")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch word page")?;
        Ok(ids)
    }

    /// Resolves word ids to word records, keeping the order of `ids`. Ids
    /// missing from the list are skipped.
    pub fn words_by_ids(&self, list_id: u64, ids: &[u64]) -> Result<Vec<Word>> {
        let mut stmt = self
            .connection
            .prepare_cached(SELECT_WORD_SQL)
            .db_context("Failed to prepare word query")?;

        let mut words = Vec::with_capacity(ids.len());
        for &word_id in ids {
            let word = stmt
                .query_row(params![list_id as i64, word_id as i64], |row| {
                    Ok(Word {
                        id: row.get::<_, i64>(0)? as u64,
                        list_id: row.get::<_, i64>(1)? as u64,
                        position: row.get::<_, i64>(2)? as u32,
                        spelling: row.get(3)?,
                        phonetic: row.get(4)?,
                        definition: row.get(5)?,
                    })
                })
                .optional()
                .db_context("Failed to query word")?;

            match word {
                Some(word) => words.push(word),
                None => warn!("Word {word_id} referenced by a plan is missing from list {list_id}"),
            }
        }
        Ok(words)
    }

    pub(crate) fn increment_learned(conn: &Connection, list_id: u64, delta: u32) -> Result<()> {
        let rows = conn
            .execute(INCREMENT_LEARNED_SQL, params![i64::from(delta), list_id as i64])
            .db_context("Failed to update learned count")?;
        if rows == 0 {
            return Err(PlannerError::ListNotFound { id: list_id });
        }
        Ok(())
    }

    pub(crate) fn increment_finished(conn: &Connection, list_id: u64, delta: u32) -> Result<()> {
        let rows = conn
            .execute(INCREMENT_FINISHED_SQL, params![i64::from(delta), list_id as i64])
            .db_context("Failed to update finished count")?;
        if rows == 0 {
            return Err(PlannerError::ListNotFound { id: list_id });
        }
        Ok(())
    }
}
