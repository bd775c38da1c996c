//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    clock::{Clock, SystemClock},
    db::{lesson_queries::validate_page_size, Database, DEFAULT_BUSY_TIMEOUT},
    error::{PlannerError, Result},
    models::lesson::DEFAULT_PAGE_SIZE,
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    clock: Option<Arc<dyn Clock>>,
    default_page_size: u32,
    busy_timeout: Duration,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            clock: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/wordman/wordman.db` or
    /// `~/.local/share/wordman/wordman.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the clock that supplies "today". Defaults to [`SystemClock`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the page size used when lessons are planned without an explicit
    /// one. Must be within 20..=100.
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Sets how long an operation waits on a locked database.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidRange` if the default page size is out of
    /// range, `PlannerError::FileSystem` if the database directory cannot be
    /// created and `PlannerError::StoreUnavailable` if database
    /// initialization fails.
    pub async fn build(self) -> Result<Planner> {
        validate_page_size(self.default_page_size)?;

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        let busy_timeout = self.busy_timeout;
        task::spawn_blocking(move || {
            let _db = Database::with_busy_timeout(&db_path_clone, busy_timeout)?;
            Ok::<(), PlannerError>(())
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!("Planner using database at {}", db_path.display());

        Ok(Planner {
            db_path,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            default_page_size: self.default_page_size,
            busy_timeout,
        })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wordman")
            .place_data_file("wordman.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
