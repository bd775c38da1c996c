//! Word list model and its aggregate counters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Installation state of a word list package.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WordListState {
    /// Known to the catalogue but the package has not been fetched
    #[default]
    NotDownloaded,

    /// Package fetched but its words are not loaded yet
    Downloaded,

    /// Words are loaded and the list can be studied
    Installed,
}

impl FromStr for WordListState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_downloaded" | "notdownloaded" => Ok(WordListState::NotDownloaded),
            "downloaded" => Ok(WordListState::Downloaded),
            "installed" => Ok(WordListState::Installed),
            _ => Err(format!("Invalid word list state: {s}")),
        }
    }
}

impl WordListState {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WordListState::NotDownloaded => "not_downloaded",
            WordListState::Downloaded => "downloaded",
            WordListState::Installed => "installed",
        }
    }
}

/// A word list with its per-list progress counters.
///
/// `learned_count` and `finished_count` only ever grow. `activation_count`
/// grows each time the list is selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordList {
    /// Unique identifier for the list
    pub id: u64,

    /// Display name, unique across lists
    pub name: String,

    /// Total number of words in the list
    pub size: u32,

    /// Installation state
    #[serde(default)]
    pub state: WordListState,

    /// How many times the list has been selected
    pub activation_count: u32,

    /// Whether the learner is currently studying this list
    pub selected: bool,

    /// Words whose lesson has been completed
    pub learned_count: u32,

    /// Words whose full review round has been completed
    pub finished_count: u32,
}

/// A word list annotated with what is outstanding today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListSummary {
    /// The list itself
    #[serde(flatten)]
    pub list: WordList,

    /// Lessons due today or overdue
    pub to_learn_count: u32,

    /// Reviews due today or overdue
    pub to_review_count: u32,
}
