//! SQLite-backed stores for word lists, lesson plans and review plans.
//!
//! A single [`Database`] value plays the three store roles the planner
//! depends on:
//!
//! - word list store: list catalogue, word paging, word lookup
//!   ([`list_queries`])
//! - plan store: lesson plans ([`lesson_queries`]) and review plans
//!   ([`review_queries`])
//! - list aggregate store: learned/finished counters and selection state
//!   ([`list_queries`])
//!
//! Every multi-row mutation runs inside one transaction, so readers never see
//! a completed plan without its counter update and review round.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod lesson_queries;
pub mod list_queries;
pub mod migrations;
pub mod review_queries;
pub mod utils;

/// How long a statement waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_busy_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Like [`Database::new`] with an explicit lock wait bound.
    pub fn with_busy_timeout<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(timeout)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
