//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items one after another and prints a short
//! notice when the collection is empty.

use std::{fmt, ops::Index};

use crate::models::{LessonPlan, ListSummary, ReviewPlan};

/// Implements the shared read-only collection API for a newtype wrapper.
macro_rules! collection_wrapper {
    ($wrapper:ident, $item:ty, $empty:literal) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $wrapper {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, $empty)
                } else {
                    for item in &self.0 {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
            }
        }
    };
}

/// Word lists with their outstanding work, as shown on the home screen.
///
/// # Examples
///
/// ```rust
/// use wordman_core::{
///     display::ListSummaries,
///     models::{ListSummary, WordList, WordListState},
/// };
///
/// let summary = ListSummary {
///     list: WordList {
///         id: 1,
///         name: "CET-6".to_string(),
///         size: 2087,
///         state: WordListState::Installed,
///         activation_count: 1,
///         selected: true,
///         learned_count: 500,
///         finished_count: 300,
///     },
///     to_learn_count: 2,
///     to_review_count: 0,
/// };
///
/// let output = ListSummaries(vec![summary]).to_string();
/// assert!(output.contains("CET-6"));
/// assert!(output.contains("2 lessons"));
/// ```
pub struct ListSummaries(pub Vec<ListSummary>);

collection_wrapper!(ListSummaries, ListSummary, "No word lists found.");

/// Lesson plans of one list.
pub struct LessonPlans(pub Vec<LessonPlan>);

collection_wrapper!(LessonPlans, LessonPlan, "No lesson plans found.");

/// Review plans of one list.
pub struct ReviewPlans(pub Vec<ReviewPlan>);

collection_wrapper!(ReviewPlans, ReviewPlan, "No review plans found.");
