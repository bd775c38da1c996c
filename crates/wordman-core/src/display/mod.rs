//! Markdown display for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see
//! [`models`]); newtype wrappers format collections, and completion results
//! render what an operation changed.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (lists, plans)  │───▶│ Result Types    │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: `ListSummaries`, `LessonPlans`, `ReviewPlans`
//! - [`results`]: lesson and review completion output
//! - [`status`]: `OperationStatus` confirmation messages
//! - [`datetime`]: calendar date formatting
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{LessonPlans, ListSummaries, ReviewPlans};
pub use datetime::CalendarDate;
pub use status::OperationStatus;
