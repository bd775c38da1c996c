//! Parameter structures for planner operations.
//!
//! These are shared by every front end. The CLI defines its own clap
//! argument structs and converts them into these types with `From`, which
//! keeps framework derives out of the core:
//!
//! ```text
//! CLI Args (clap) ──into()──▶ Core Params ──▶ Planner
//! ```

use serde::{Deserialize, Serialize};

use crate::models::NewWord;

/// Parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for installing a word list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallList {
    /// Unique display name of the list
    pub name: String,
    /// Words in study order
    pub words: Vec<NewWord>,
}

/// Parameters for generating a list's lesson plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnsureLessons {
    /// List to plan
    pub list_id: u64,
    /// Words per lesson, 20..=100. Falls back to the planner's default.
    pub page_size: Option<u32>,
}

/// Parameters identifying a plan inside a list, for completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinishPlan {
    /// List the plan belongs to
    pub list_id: u64,
    /// Lesson or review plan ID
    pub plan_id: u64,
}
