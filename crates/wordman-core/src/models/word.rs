//! Word records stored per list.

use serde::{Deserialize, Serialize};

/// A single word belonging to a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Word {
    /// Identifier of the word within its list
    pub id: u64,

    /// Owning list
    pub list_id: u64,

    /// Zero-based position in the list's study order
    pub position: u32,

    /// The word itself
    pub spelling: String,

    /// Pronunciation hint
    pub phonetic: Option<String>,

    /// Meaning shown to the learner
    pub definition: Option<String>,
}

/// Word content supplied when installing a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewWord {
    pub spelling: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
}

impl NewWord {
    pub fn new(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            ..Default::default()
        }
    }
}
