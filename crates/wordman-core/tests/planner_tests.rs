mod common;

use jiff::{civil::date, ToSpan};
use wordman_core::{EnsureLessons, FinishPlan, Id, InstallList, PlannerError};

use common::{create_test_planner, numbered_words};

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_study_workflow() {
    let start = date(2024, 3, 1);
    let (_temp_dir, clock, planner) = create_test_planner(start).await;

    let list = planner
        .install_list(&InstallList {
            name: "Workflow".to_string(),
            words: numbered_words(45),
        })
        .await
        .expect("Failed to install list");
    assert_eq!(list.size, 45);

    let selected = planner
        .select_list(&Id { id: list.id })
        .await
        .expect("Failed to select list");
    assert_eq!(selected.activation_count, 1);

    let lessons = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id: list.id,
            page_size: Some(20),
        })
        .await
        .expect("Failed to plan lessons");
    assert_eq!(lessons.len(), 3);
    assert_eq!(lessons[2].word_count(), 5);
    assert_eq!(lessons[2].scheduled_date, start + 2.days());

    // Day 0: learn lesson 1
    let due = planner
        .due_lesson(&Id { id: list.id })
        .await
        .unwrap()
        .expect("Lesson 1 should be due");
    assert_eq!(due.plan.lesson_number, 1);
    assert_eq!(due.words[0].definition.as_deref(), Some("meaning of word1"));

    let completion = planner
        .finish_lesson(&FinishPlan {
            list_id: list.id,
            plan_id: due.plan.id,
        })
        .await
        .expect("Failed to finish lesson");
    let expected: Vec<_> = [1, 2, 4, 7, 15]
        .into_iter()
        .map(|offset: i64| start + offset.days())
        .collect();
    let scheduled: Vec<_> = completion
        .round
        .plans
        .iter()
        .map(|p| p.scheduled_date)
        .collect();
    assert_eq!(scheduled, expected);
    assert!(planner.due_lesson(&Id { id: list.id }).await.unwrap().is_none());

    // Walk every day of the next two weeks, doing whatever is due
    let mut rounds_finished = 0;
    for _ in 0..15 {
        clock.advance(1);

        while let Some(lesson) = planner.due_lesson(&Id { id: list.id }).await.unwrap() {
            planner
                .finish_lesson(&FinishPlan {
                    list_id: list.id,
                    plan_id: lesson.plan.id,
                })
                .await
                .unwrap();
        }

        while let Some(review) = planner.due_review(&Id { id: list.id }).await.unwrap() {
            let done = planner
                .finish_review(&FinishPlan {
                    list_id: list.id,
                    plan_id: review.plan.id,
                })
                .await
                .unwrap();
            if done.round_finished {
                rounds_finished += 1;
            }
        }
    }

    // Day 15 closes lesson 1's round only; lessons 2 and 3 end on days 16 and 17
    assert_eq!(rounds_finished, 1);
    let list = planner.require_list(&Id { id: list.id }).await.unwrap();
    assert_eq!(list.learned_count, 45);
    assert_eq!(list.finished_count, 20);

    clock.advance(2);
    assert_eq!(planner.count_due_reviews(&Id { id: list.id }).await.unwrap(), 2);
}

#[tokio::test]
async fn test_concurrent_ensure_generates_one_set() {
    let (_temp_dir, _clock, planner) = create_test_planner(date(2024, 3, 1)).await;
    let list = planner
        .install_list(&InstallList {
            name: "Concurrent".to_string(),
            words: numbered_words(100),
        })
        .await
        .unwrap();

    let params = EnsureLessons {
        list_id: list.id,
        page_size: Some(20),
    };
    let (a, b, c) = tokio::join!(
        planner.ensure_lesson_plans(&params),
        planner.ensure_lesson_plans(&params),
        planner.ensure_lesson_plans(&params),
    );

    let a = a.unwrap();
    assert_eq!(a.len(), 5);
    assert_eq!(a, b.unwrap());
    assert_eq!(a, c.unwrap());
    assert_eq!(planner.lesson_plans(&Id { id: list.id }).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_concurrent_finish_lesson_completes_once() {
    let (_temp_dir, _clock, planner) = create_test_planner(date(2024, 3, 1)).await;
    let list = planner
        .install_list(&InstallList {
            name: "Race".to_string(),
            words: numbered_words(20),
        })
        .await
        .unwrap();
    let lessons = planner
        .ensure_lesson_plans(&EnsureLessons {
            list_id: list.id,
            page_size: None,
        })
        .await
        .unwrap();

    let params = FinishPlan {
        list_id: list.id,
        plan_id: lessons[0].id,
    };
    let (a, b) = tokio::join!(
        planner.finish_lesson(&params),
        planner.finish_lesson(&params)
    );

    let outcomes = [a, b];
    let successes = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(outcomes
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(PlannerError::is_already_done));

    let list = planner.require_list(&Id { id: list.id }).await.unwrap();
    assert_eq!(list.learned_count, 20);
    assert_eq!(planner.review_plans(&Id { id: list.id }).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_planner_persists_across_instances() {
    let (temp_dir, _clock, planner) = create_test_planner(date(2024, 3, 1)).await;
    let list = planner
        .install_list(&InstallList {
            name: "Persistent".to_string(),
            words: numbered_words(25),
        })
        .await
        .unwrap();
    planner.select_list(&Id { id: list.id }).await.unwrap();
    drop(planner);

    let reopened = wordman_core::PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .unwrap();
    let list = reopened.require_list(&Id { id: list.id }).await.unwrap();
    assert!(list.selected);
    assert_eq!(list.size, 25);
}
