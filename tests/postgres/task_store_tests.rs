//! `PostgreSQL` integration tests for task insert, due windows, and completion.

use chrono::{DateTime, TimeZone, Utc};
use followup::task::{
    domain::{DueWindow, NewTask, Task, TaskId, TaskStatus, TaskType},
    ports::{TaskRepository, TaskRepositoryError},
};
use rstest::rstest;
use std::sync::Arc;

use crate::postgres::helpers::{BoxError, StoreContext, clock, store};
use crate::test_helpers::FixedClock;

fn new_task(clock: FixedClock, application_id: &str, due_at: &str) -> NewTask {
    NewTask::validate(Some(application_id), Some("call"), Some(due_at), clock.0)
        .expect("valid task input")
}

async fn insert(ctx: &StoreContext, clock: FixedClock, due_at: &str) -> Task {
    ctx.repository
        .insert(new_task(clock, "app-1", due_at))
        .await
        .expect("insert should succeed")
}

fn day_window() -> DueWindow {
    let reference = Utc
        .with_ymd_and_hms(2026, 10, 19, 8, 0, 0)
        .single()
        .expect("valid reference instant");
    DueWindow::utc_day(reference).expect("window should be representable")
}

fn instant(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid instant")
        .with_timezone(&Utc)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_assigns_identity_and_round_trips(
    clock: FixedClock,
    #[future] store: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = store.await?;

    let created = ctx
        .repository
        .insert(new_task(clock, "app-42", "2026-10-19T14:30:00Z"))
        .await?;

    assert_eq!(created.application_id().as_str(), "app-42");
    assert_eq!(created.task_type(), TaskType::Call);
    assert_eq!(created.status(), TaskStatus::Pending);
    assert_eq!(created.due_at(), instant("2026-10-19T14:30:00Z"));
    assert_eq!(created.created_at(), clock.0);

    let found = ctx.repository.find_by_id(created.id()).await?;
    assert_eq!(found, Some(created));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inserts_receive_distinct_ids(
    clock: FixedClock,
    #[future] store: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = store.await?;

    let first = insert(&ctx, clock, "2026-10-19T10:00:00Z").await;
    let second = insert(&ctx, clock, "2026-10-19T10:00:00Z").await;

    assert_ne!(first.id(), second.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_window_includes_both_day_bounds_only(
    clock: FixedClock,
    #[future] store: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = store.await?;

    let last = insert(&ctx, clock, "2026-10-19T23:59:59.999999Z").await;
    let midday = insert(&ctx, clock, "2026-10-19T12:00:00Z").await;
    let start = insert(&ctx, clock, "2026-10-19T00:00:00Z").await;
    insert(&ctx, clock, "2026-10-18T23:59:59.999999Z").await;
    insert(&ctx, clock, "2026-10-20T00:00:00Z").await;

    let due = ctx.repository.find_pending_due_between(day_window()).await?;

    let ids: Vec<TaskId> = due.iter().map(Task::id).collect();
    assert_eq!(ids, vec![start.id(), midday.id(), last.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn equal_due_times_are_ordered_by_id(
    clock: FixedClock,
    #[future] store: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = store.await?;

    let mut expected = Vec::new();
    for _ in 0..3 {
        expected.push(insert(&ctx, clock, "2026-10-19T09:00:00Z").await.id());
    }
    expected.sort();

    let due = ctx.repository.find_pending_due_between(day_window()).await?;

    let ids: Vec<TaskId> = due.iter().map(Task::id).collect();
    assert_eq!(ids, expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_reports_prior_status_and_leaves_window(
    clock: FixedClock,
    #[future] store: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = store.await?;
    let task = insert(&ctx, clock, "2026-10-19T10:00:00Z").await;

    let first = ctx.repository.mark_completed(task.id()).await?;
    let repeat = ctx.repository.mark_completed(task.id()).await?;

    assert_eq!(first, TaskStatus::Pending);
    assert_eq!(repeat, TaskStatus::Completed);
    let stored = ctx
        .repository
        .find_by_id(task.id())
        .await?
        .expect("completed task is kept");
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert!(
        ctx.repository
            .find_pending_due_between(day_window())
            .await?
            .is_empty()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_unknown_id_is_not_found(
    #[future] store: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = store.await?;
    let missing = TaskId::generate();

    let result = ctx.repository.mark_completed(missing).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    assert_eq!(ctx.repository.find_by_id(missing).await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_completions_see_one_first_completion(
    clock: FixedClock,
    #[future] store: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = Arc::new(store.await?);
    let id = insert(&ctx, clock, "2026-10-19T10:00:00Z").await.id();

    let mut handles = Vec::new();
    for _ in 0..6 {
        let racer = Arc::clone(&ctx);
        handles.push(tokio::spawn(
            async move { racer.service.complete_task(id).await },
        ));
    }

    let mut first_completions = 0;
    for handle in handles {
        let completion = handle.await??;
        if !completion.already_completed() {
            first_completions += 1;
        }
    }
    assert_eq!(first_completions, 1);
    Ok(())
}
