//! Error types for the scheduling library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which kind of plan an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    Lesson,
    Review,
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKind::Lesson => write!(f, "Lesson plan"),
            PlanKind::Review => write!(f, "Review plan"),
        }
    }
}

/// Error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// The storage collaborator failed. Never recovered locally; the caller
    /// decides whether to retry.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Word list not found for the given ID
    #[error("Word list with ID {id} not found")]
    ListNotFound { id: u64 },
    /// Lesson plan not found for the given list
    #[error("Lesson plan with ID {id} not found in list {list_id}")]
    LessonNotFound { list_id: u64, id: u64 },
    /// Review plan not found for the given list
    #[error("Review plan with ID {id} not found in list {list_id}")]
    ReviewNotFound { list_id: u64, id: u64 },
    /// Review round not found
    #[error("Review round with ID {id} not found")]
    RoundNotFound { id: u64 },
    /// The plan already carries a completion date
    #[error("{kind} with ID {id} is already completed")]
    AlreadyDone { kind: PlanKind, id: u64 },
    /// A numeric argument fell outside its allowed range
    #[error("Invalid value {value} for '{field}': expected {min}..={max}")]
    InvalidRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration and runtime plumbing errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for store errors with context.
pub struct StoreErrorBuilder {
    message: String,
}

impl StoreErrorBuilder {
    /// Create a new store error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::StoreUnavailable {
            message: self.message,
            source,
        }
    }
}

impl PlannerError {
    /// Creates a builder for store errors.
    pub fn store(message: impl Into<String>) -> StoreErrorBuilder {
        StoreErrorBuilder::new(message)
    }

    /// Creates an input validation error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for every "referenced thing does not exist" error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ListNotFound { .. }
                | Self::LessonNotFound { .. }
                | Self::ReviewNotFound { .. }
                | Self::RoundNotFound { .. }
        )
    }

    /// True when a completion was attempted on a terminal plan.
    pub fn is_already_done(&self) -> bool {
        matches!(self, Self::AlreadyDone { .. })
    }
}

/// Extension trait mapping rusqlite results into `StoreUnavailable`.
pub trait DatabaseResultExt<T> {
    /// Map store errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::store(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
