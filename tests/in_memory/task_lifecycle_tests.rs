//! In-memory integration tests for the task lifecycle.

use std::sync::Arc;

use crate::in_memory::helpers::{clock, harness};
use crate::test_helpers::{FixedClock, TestService, in_memory_service};
use chrono::{TimeDelta, TimeZone, Utc};
use followup::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskDomainError, TaskId, TaskStatus, TaskType},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use rstest::rstest;

type Harness = (Arc<InMemoryTaskRepository>, TestService);

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_due_today_round_trips_unchanged(harness: Harness) {
    let (_, service) = harness;

    let created = service
        .create_task(CreateTaskRequest::new("app-1", "call", "2026-10-19T17:45:00Z"))
        .await
        .expect("task creation should succeed");
    let due = service
        .tasks_due_today()
        .await
        .expect("query should succeed");

    assert_eq!(due, vec![created.clone()]);
    let listed = due.first().expect("one task listed");
    assert_eq!(listed.application_id().as_str(), "app-1");
    assert_eq!(listed.task_type(), TaskType::Call);
    assert_eq!(listed.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tomorrow_task_is_listed_on_its_own_day(clock: FixedClock, harness: Harness) {
    let (_, service) = harness;
    let tomorrow = (clock.0 + TimeDelta::days(1)).to_rfc3339();

    let created = service
        .create_task(CreateTaskRequest::new("app-1", "call", tomorrow))
        .await
        .expect("task creation should succeed");

    assert!(
        service
            .tasks_due_today()
            .await
            .expect("query should succeed")
            .is_empty()
    );
    let due = service
        .tasks_due_on(created.due_at())
        .await
        .expect("query should succeed");
    assert_eq!(due, vec![created]);
}

#[rstest]
#[case(CreateTaskRequest::from_parts(None, Some("call".to_owned()), Some("2026-10-20".to_owned())))]
#[case(CreateTaskRequest::from_parts(Some("app-1".to_owned()), None, Some("2026-10-20".to_owned())))]
#[case(CreateTaskRequest::from_parts(Some("app-1".to_owned()), Some("call".to_owned()), None))]
#[case(CreateTaskRequest::new("", "call", "2026-10-20"))]
#[case(CreateTaskRequest::default())]
#[tokio::test(flavor = "multi_thread")]
async fn missing_fields_write_nothing(harness: Harness, #[case] request: CreateTaskRequest) {
    let (repository, service) = harness;

    let result = service.create_task(request).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::MissingField(_)))
    ));
    assert!(repository.is_empty().expect("lock should be healthy"));
}

#[rstest]
#[case("sms")]
#[case("calls")]
#[case("REVIEW")]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_type_is_invalid_enum(harness: Harness, #[case] task_type: &str) {
    let (repository, service) = harness;

    let result = service
        .create_task(CreateTaskRequest::new("app-1", task_type, "2026-10-20"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::InvalidEnum(_)))
    ));
    assert!(repository.is_empty().expect("lock should be healthy"));
}

#[rstest]
#[case("next tuesday")]
#[case("2026-02-30")]
#[case("1760000000")]
#[tokio::test(flavor = "multi_thread")]
async fn unparsable_due_at_is_invalid_timestamp(harness: Harness, #[case] due_at: &str) {
    let (_, service) = harness;

    let result = service
        .create_task(CreateTaskRequest::new("app-1", "email", due_at))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::InvalidTimestamp(_)))
    ));
}

#[rstest]
#[case("2026-10-19T08:00:00Z")]
#[case("2026-10-19T07:59:59Z")]
#[case("2025-01-01")]
#[tokio::test(flavor = "multi_thread")]
async fn due_at_not_after_now_is_past_due(harness: Harness, #[case] due_at: &str) {
    let (repository, service) = harness;

    let result = service
        .create_task(CreateTaskRequest::new("app-1", "review", due_at))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::PastDueDate { .. }))
    ));
    assert!(repository.is_empty().expect("lock should be healthy"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_leaves_due_today_and_stays_completed(harness: Harness) {
    let (_, service) = harness;
    let task = service
        .create_task(CreateTaskRequest::new("app-1", "email", "2026-10-19T10:00:00Z"))
        .await
        .expect("task creation should succeed");

    service
        .complete_task(task.id())
        .await
        .expect("first completion should succeed");
    assert!(
        service
            .tasks_due_today()
            .await
            .expect("query should succeed")
            .is_empty()
    );

    let repeat = service
        .complete_task(task.id())
        .await
        .expect("repeat completion should not be an error");
    assert!(repeat.already_completed());

    let stored = service
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should still exist");
    assert_eq!(stored.status(), TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_unknown_id_is_not_found(harness: Harness) {
    let (_, service) = harness;

    let result = service.complete_task(TaskId::generate()).await;

    assert!(matches!(result, Err(TaskLifecycleError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_today_respects_window_edges_and_order(clock: FixedClock) {
    // Create with an early clock so the whole day is still in the future.
    let (repository, early_service) = in_memory_service(FixedClock::at(2026, 10, 18, 0, 0, 0));
    let mut created = Vec::new();
    for due_at in [
        "2026-10-19T23:59:59.999999999Z",
        "2026-10-19T12:00:00Z",
        "2026-10-19T00:00:00Z",
        "2026-10-18T23:59:59.999999999Z",
        "2026-10-20T00:00:00Z",
    ] {
        let task = early_service
            .create_task(CreateTaskRequest::new("app-1", "call", due_at))
            .await
            .expect("task creation should succeed");
        created.push(task);
    }
    let [last_instant, midday, first_instant, _previous_day, _next_day] =
        <[_; 5]>::try_from(created).expect("five tasks created");

    let service = TaskLifecycleService::new(repository, Arc::new(clock));
    let due = service.tasks_due_today().await.expect("query should succeed");

    assert_eq!(due, vec![first_instant, midday, last_instant]);
    let reference = Utc
        .with_ymd_and_hms(2026, 10, 19, 23, 0, 0)
        .single()
        .expect("valid instant");
    assert_eq!(
        service.tasks_due_on(reference).await.expect("query should succeed").len(),
        3
    );
}
