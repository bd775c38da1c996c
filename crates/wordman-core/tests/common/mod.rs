use std::sync::Arc;

use jiff::civil::Date;
use tempfile::TempDir;
use wordman_core::{ManualClock, NewWord, Planner, PlannerBuilder};

/// Helper function to create a test planner whose clock starts at `today`
pub async fn create_test_planner(today: Date) -> (TempDir, Arc<ManualClock>, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let clock = Arc::new(ManualClock::new(today));
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_clock(clock.clone())
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, clock, planner)
}

/// `count` words named `word1`, `word2`, ...
pub fn numbered_words(count: usize) -> Vec<NewWord> {
    (1..=count)
        .map(|i| NewWord {
            spelling: format!("word{i}"),
            phonetic: None,
            definition: Some(format!("meaning of word{i}")),
        })
        .collect()
}
