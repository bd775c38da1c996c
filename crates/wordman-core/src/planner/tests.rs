//! Tests for the planner module.

use std::sync::Arc;

use jiff::{civil::date, ToSpan};
use tempfile::TempDir;

use super::*;
use crate::{
    clock::ManualClock,
    models::NewWord,
    params::{EnsureLessons, FinishPlan, Id, InstallList},
    PlanKind,
};

/// Helper function to create a test planner pinned to 2024-03-01
async fn create_test_planner() -> (TempDir, Arc<ManualClock>, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let clock = Arc::new(ManualClock::new(date(2024, 3, 1)));
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_clock(clock.clone())
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, clock, planner)
}

fn numbered_words(count: usize) -> Vec<NewWord> {
    (1..=count).map(|i| NewWord::new(format!("word{i}"))).collect()
}

async fn install(planner: &Planner, name: &str, count: usize) -> u64 {
    planner
        .install_list(&InstallList {
            name: name.to_string(),
            words: numbered_words(count),
        })
        .await
        .expect("Failed to install list")
        .id
}

#[tokio::test]
async fn test_ensure_lesson_plans_pages_list() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Forty-five", 45).await;

    let plans = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: Some(20),
        })
        .await
        .expect("Failed to ensure lesson plans");

    let sizes: Vec<u32> = plans.iter().map(|p| p.word_count()).collect();
    assert_eq!(sizes, vec![20, 20, 5]);

    let start = date(2024, 3, 1);
    for (k, plan) in plans.iter().enumerate() {
        assert_eq!(plan.lesson_number, k as u32 + 1);
        assert_eq!(plan.scheduled_date, start + (k as i64).days());
        assert!(plan.completed_date.is_none());
    }

    // Words are taken in list order without gaps or overlap
    let all_ids: Vec<u64> = plans.iter().flat_map(|p| p.word_ids.clone()).collect();
    assert_eq!(all_ids, (1..=45).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_ensure_lesson_plans_is_idempotent() {
    let (_temp_dir, clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Idempotent", 50).await;

    let first = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: Some(25),
        })
        .await
        .unwrap();

    // A later call with another page size and date changes nothing
    clock.advance(3);
    let second = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: Some(40),
        })
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn test_ensure_lesson_plans_uses_default_page_size() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Defaults", 41).await;

    let plans = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: None,
        })
        .await
        .unwrap();

    assert_eq!(plans.len(), 3);
    assert_eq!(plans[2].word_count(), 1);
}

#[tokio::test]
async fn test_ensure_lesson_plans_rejects_page_size_out_of_range() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Ranges", 30).await;

    for page_size in [19, 101] {
        let result = planner
            .ensure_lesson_plans(&EnsureLessons {
                list_id,
                page_size: Some(page_size),
            })
            .await;
        assert!(matches!(
            result,
            Err(PlannerError::InvalidRange { min: 20, max: 100, .. })
        ));
    }

    // Nothing was generated by the rejected calls
    let plans = planner.lesson_plans(&Id { id: list_id }).await.unwrap();
    assert!(plans.is_empty());
}

#[tokio::test]
async fn test_ensure_lesson_plans_unknown_list() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;

    let result = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id: 99,
            page_size: None,
        })
        .await;
    assert!(matches!(result, Err(PlannerError::ListNotFound { id: 99 })));
}

#[tokio::test]
async fn test_due_lesson_backlog_grows_when_skipped() {
    let (_temp_dir, clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Backlog", 60).await;
    planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: Some(20),
        })
        .await
        .unwrap();

    assert_eq!(planner.count_due_lessons(&Id { id: list_id }).await.unwrap(), 1);

    clock.advance(2);
    assert_eq!(planner.count_due_lessons(&Id { id: list_id }).await.unwrap(), 3);

    let due = planner
        .due_lesson(&Id { id: list_id })
        .await
        .unwrap()
        .expect("A lesson should be due");
    assert_eq!(due.plan.lesson_number, 1);
    assert_eq!(due.backlog, 3);
    assert_eq!(due.words.len(), 20);
    assert_eq!(due.words[0].spelling, "word1");
}

#[tokio::test]
async fn test_finish_lesson_schedules_review_round() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Rounds", 45).await;
    let plans = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: Some(20),
        })
        .await
        .unwrap();

    let completion = planner
        .finish_lesson(&FinishPlan {
            list_id,
            plan_id: plans[0].id,
        })
        .await
        .expect("Failed to finish lesson");

    let today = date(2024, 3, 1);
    assert_eq!(completion.lesson.completed_date, Some(today));
    assert_eq!(completion.round.plans.len(), 5);

    let offsets: Vec<i32> = completion
        .round
        .plans
        .iter()
        .map(|p| (p.scheduled_date - today).get_days())
        .collect();
    assert_eq!(offsets, vec![1, 2, 4, 7, 15]);
    assert!(completion
        .round
        .plans
        .iter()
        .all(|p| p.word_ids == plans[0].word_ids && p.round_id == completion.round.id));

    let list = planner.require_list(&Id { id: list_id }).await.unwrap();
    assert_eq!(list.learned_count, 20);
    assert_eq!(list.finished_count, 0);

    let round = planner
        .review_round(&Id {
            id: completion.round.id,
        })
        .await
        .unwrap();
    assert_eq!(round, completion.round);
}

#[tokio::test]
async fn test_finish_lesson_twice_is_already_done() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Twice", 20).await;
    let plans = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: None,
        })
        .await
        .unwrap();
    let params = FinishPlan {
        list_id,
        plan_id: plans[0].id,
    };

    planner.finish_lesson(&params).await.unwrap();
    let err = planner.finish_lesson(&params).await.unwrap_err();
    assert!(err.is_already_done());
    assert!(matches!(
        err,
        PlannerError::AlreadyDone {
            kind: PlanKind::Lesson,
            ..
        }
    ));

    // The retry added neither words nor reviews
    let list = planner.require_list(&Id { id: list_id }).await.unwrap();
    assert_eq!(list.learned_count, 20);
    assert_eq!(planner.review_plans(&Id { id: list_id }).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_finish_lesson_not_found() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Missing", 20).await;
    let other_id = install(&planner, "Other", 20).await;
    let plans = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: None,
        })
        .await
        .unwrap();

    let err = planner
        .finish_lesson(&FinishPlan {
            list_id,
            plan_id: 999,
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // A plan id from another list is not found either
    let err = planner
        .finish_lesson(&FinishPlan {
            list_id: other_id,
            plan_id: plans[0].id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::LessonNotFound { .. }));
}

#[tokio::test]
async fn test_review_round_finishes_once() {
    let (_temp_dir, clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Reviews", 45).await;
    let plans = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: Some(20),
        })
        .await
        .unwrap();
    planner
        .finish_lesson(&FinishPlan {
            list_id,
            plan_id: plans[0].id,
        })
        .await
        .unwrap();

    // Nothing to review on the day the lesson was learned
    assert!(planner.due_review(&Id { id: list_id }).await.unwrap().is_none());

    let mut finished_flags = Vec::new();
    for gap in [1, 1, 2, 3, 8] {
        clock.advance(gap);
        let due = planner
            .due_review(&Id { id: list_id })
            .await
            .unwrap()
            .expect("A review should be due");
        assert_eq!(due.backlog, 1);
        assert_eq!(due.words.len(), 20);

        let completion = planner
            .finish_review(&FinishPlan {
                list_id,
                plan_id: due.plan.id,
            })
            .await
            .unwrap();
        finished_flags.push(completion.round_finished);
    }
    assert_eq!(finished_flags, vec![false, false, false, false, true]);

    let list = planner.require_list(&Id { id: list_id }).await.unwrap();
    assert_eq!(list.finished_count, 20);
    assert_eq!(planner.count_due_reviews(&Id { id: list_id }).await.unwrap(), 0);

    // Completing the last stage of a finished round again changes nothing
    let plans = planner.review_plans(&Id { id: list_id }).await.unwrap();
    let last_stage = plans
        .iter()
        .find(|p| p.stage_index == 5)
        .expect("Stage 5 should exist");
    let err = planner
        .finish_review(&FinishPlan {
            list_id,
            plan_id: last_stage.id,
        })
        .await
        .unwrap_err();
    assert!(err.is_already_done());

    let list = planner.require_list(&Id { id: list_id }).await.unwrap();
    assert_eq!(list.finished_count, 20);
}

#[tokio::test]
async fn test_finish_review_twice_is_already_done() {
    let (_temp_dir, clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Review twice", 20).await;
    let plans = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id,
            page_size: None,
        })
        .await
        .unwrap();
    let completion = planner
        .finish_lesson(&FinishPlan {
            list_id,
            plan_id: plans[0].id,
        })
        .await
        .unwrap();

    clock.advance(1);
    let params = FinishPlan {
        list_id,
        plan_id: completion.round.plans[0].id,
    };
    planner.finish_review(&params).await.unwrap();
    let err = planner.finish_review(&params).await.unwrap_err();
    assert!(matches!(
        err,
        PlannerError::AlreadyDone {
            kind: PlanKind::Review,
            ..
        }
    ));

    let err = planner
        .finish_review(&FinishPlan {
            list_id,
            plan_id: 12345,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::ReviewNotFound { .. }));
}

#[tokio::test]
async fn test_review_round_not_found() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;

    let err = planner.review_round(&Id { id: 42 }).await.unwrap_err();
    assert!(matches!(err, PlannerError::RoundNotFound { id: 42 }));
}

#[tokio::test]
async fn test_list_summaries_order_and_counts() {
    let (_temp_dir, clock, planner) = create_test_planner().await;
    let first = install(&planner, "First", 20).await;
    let second = install(&planner, "Second", 40).await;
    let third = install(&planner, "Third", 20).await;

    // Several lists may be selected at once
    planner.select_list(&Id { id: third }).await.unwrap();
    planner.select_list(&Id { id: second }).await.unwrap();
    planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id: second,
            page_size: None,
        })
        .await
        .unwrap();

    clock.advance(1);
    let summaries = planner.list_summaries().await.unwrap();
    let ids: Vec<u64> = summaries.iter().map(|s| s.list.id).collect();
    assert_eq!(ids, vec![second, third, first]);

    assert_eq!(summaries[0].to_learn_count, 2);
    assert_eq!(summaries[0].to_review_count, 0);
    assert_eq!(summaries[1].to_learn_count, 0);
    assert!(summaries[0].list.selected && summaries[1].list.selected);
    assert!(!summaries[2].list.selected);
}

#[tokio::test]
async fn test_select_list_counts_activations() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Activations", 20).await;

    planner.select_list(&Id { id: list_id }).await.unwrap();
    let deselected = planner.deselect_list(&Id { id: list_id }).await.unwrap();
    assert!(!deselected.selected);

    let reselected = planner.select_list(&Id { id: list_id }).await.unwrap();
    assert!(reselected.selected);
    assert_eq!(reselected.activation_count, 2);

    let err = planner.select_list(&Id { id: 77 }).await.unwrap_err();
    assert!(matches!(err, PlannerError::ListNotFound { id: 77 }));
}

#[tokio::test]
async fn test_install_list_rejects_duplicate_name() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    install(&planner, "Same", 20).await;

    let result = planner
        .install_list(&InstallList {
            name: "Same".to_string(),
            words: numbered_words(5),
        })
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));

    let result = planner
        .install_list(&InstallList {
            name: "  ".to_string(),
            words: numbered_words(5),
        })
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_word_counts() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;
    let list_id = install(&planner, "Counted", 33).await;
    install(&planner, "Also counted", 12).await;

    assert_eq!(planner.list_size(&Id { id: list_id }).await.unwrap(), 33);
    assert_eq!(planner.count_words().await.unwrap(), 45);
    assert!(planner.list_size(&Id { id: 500 }).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_builder_rejects_invalid_default_page_size() {
    let temp_dir = TempDir::new().unwrap();
    let result = PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_default_page_size(10)
        .build()
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidRange { value: 10, .. })));
}

#[tokio::test]
async fn test_count_due_unknown_list() {
    let (_temp_dir, _clock, planner) = create_test_planner().await;

    let err = planner.count_due_lessons(&Id { id: 999 }).await.unwrap_err();
    assert!(err.is_not_found());
    let err = planner.count_due_reviews(&Id { id: 999 }).await.unwrap_err();
    assert!(matches!(err, PlannerError::ListNotFound { id: 999 }));
    assert!(planner.due_lesson(&Id { id: 999 }).await.unwrap_err().is_not_found());
}
