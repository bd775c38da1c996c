use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output, an isolated database and a pinned date
fn wordman_cmd(db_path: &Path, today: &str) -> Command {
    let mut cmd = Command::cargo_bin("wordman").expect("Failed to find wordman binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .arg("--today")
        .arg(today);
    cmd
}

/// Writes a word list file with `count` words and returns its path
fn write_list_file(dir: &Path, name: &str, count: usize) -> String {
    let words: Vec<String> = (1..=count)
        .map(|i| format!(r#"{{"spelling": "word{i}", "definition": "meaning {i}"}}"#))
        .collect();
    let json = format!(r#"{{"name": "{name}", "words": [{}]}}"#, words.join(","));

    let path = dir.join(format!("{name}.json"));
    fs::write(&path, json).expect("Failed to write list file");
    path.to_str().unwrap().to_string()
}

/// Installs a 45-word list and selects it with 20 words per lesson
fn setup_selected_list(temp_dir: &TempDir) -> std::path::PathBuf {
    let db_path = temp_dir.path().join("cli_test.db");
    let file = write_list_file(temp_dir.path(), "Basics", 45);

    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "import", &file])
        .assert()
        .success();
    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "select", "1", "--page-size", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lessons planned"));
    db_path
}

#[test]
fn test_cli_no_lists() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wordman_cmd(&db_path, "2024-03-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("No word lists found."));
}

#[test]
fn test_cli_import_and_show_list() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let file = write_list_file(temp_dir.path(), "Animals", 30);

    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "import", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Installed 'Animals' with 30 words (ID: 1)",
        ));

    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Animals"))
        .stdout(predicate::str::contains("- Words: 30"));

    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "words"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30 words installed."));
}

#[test]
fn test_cli_import_invalid_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let file = temp_dir.path().join("broken.json");
    fs::write(&file, "{ not json").unwrap();

    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "import", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid word list file"));
}

#[test]
fn test_cli_lesson_today_and_finish() {
    let temp_dir = create_cli_test_environment();
    let db_path = setup_selected_list(&temp_dir);

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "today", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Lesson 1 (ID: 1, ○ Scheduled)"))
        .stdout(predicate::str::contains("- **word1**: meaning 1"));

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "finish", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished lesson 1 (20 words)."))
        .stdout(predicate::str::contains("- Stage 1: 2024-03-02 (Sat)"))
        .stdout(predicate::str::contains("- Stage 5: 2024-03-16 (Sat)"));

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "today", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No lessons due today."));
}

#[test]
fn test_cli_finish_lesson_twice_is_reported() {
    let temp_dir = create_cli_test_environment();
    let db_path = setup_selected_list(&temp_dir);

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "finish", "1", "1"])
        .assert()
        .success();

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "finish", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Lesson plan with ID 1 is already completed",
        ));

    // The repeat scheduled no second round
    wordman_cmd(&db_path, "2024-03-01")
        .args(["review", "plans", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Round: 2").not())
        .stdout(predicate::str::contains("- Round: 1"));

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "finish", "1", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lesson plan with ID 99 not found"));
}

#[test]
fn test_cli_backlog_after_missed_days() {
    let temp_dir = create_cli_test_environment();
    let db_path = setup_selected_list(&temp_dir);

    wordman_cmd(&db_path, "2024-03-03")
        .args(["lesson", "today", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lessons to learn."));

    wordman_cmd(&db_path, "2024-03-03")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Basics (ID: 1) ★"))
        .stdout(predicate::str::contains("- **To learn**: 3 lessons"));
}

#[test]
fn test_cli_review_flow() {
    let temp_dir = create_cli_test_environment();
    let db_path = setup_selected_list(&temp_dir);

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "finish", "1", "1"])
        .assert()
        .success();

    wordman_cmd(&db_path, "2024-03-01")
        .args(["review", "today", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reviews due today."));

    wordman_cmd(&db_path, "2024-03-02")
        .args(["review", "today", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Review 1/5 of lesson 1 (ID: 1"));

    wordman_cmd(&db_path, "2024-03-02")
        .args(["review", "finish", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished review 1/5 of lesson 1."));

    wordman_cmd(&db_path, "2024-03-02")
        .args(["review", "round", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/5 stages done"));
}

#[test]
fn test_cli_select_rejects_small_page_size() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let file = write_list_file(temp_dir.path(), "Small", 20);

    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "import", &file])
        .assert()
        .success();

    wordman_cmd(&db_path, "2024-03-01")
        .args(["list", "select", "1", "--page-size", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 20..=100"));
}

#[test]
fn test_cli_unknown_list() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wordman_cmd(&db_path, "2024-03-01")
        .args(["lesson", "today", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Word list with ID 9 not found"));
}

#[test]
fn test_cli_rejects_bad_date() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wordman_cmd(&db_path, "2024-13-40")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--today"));
}
