use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;

use super::*;

fn schedule_for(endpoint: &str, in_millis: i64) -> Schedule {
    Schedule {
        name: Schedule::shutdown_name(endpoint),
        fire_at: Utc::now() + chrono::Duration::milliseconds(in_millis),
        payload: SchedulePayload {
            endpoint_name: endpoint.to_string(),
        },
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let (scheduler, _fired) = LocalScheduler::new();
    let schedule = schedule_for("ep-1", 60_000);
    scheduler.create(schedule.clone()).await.unwrap();

    let fetched = scheduler.get(&schedule.name).await.unwrap();
    assert_eq!(fetched, schedule);
}

#[tokio::test]
async fn duplicate_create_is_rejected() {
    let (scheduler, _fired) = LocalScheduler::new();
    scheduler.create(schedule_for("ep-1", 60_000)).await.unwrap();

    let err = scheduler
        .create(schedule_for("ep-1", 60_000))
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_replaces_fire_time_in_place() {
    let (scheduler, _fired) = LocalScheduler::new();
    let schedule = schedule_for("ep-1", 60_000);
    scheduler.create(schedule.clone()).await.unwrap();

    let later = Utc::now() + chrono::Duration::minutes(30);
    scheduler.update_fire_at(&schedule.name, later).await.unwrap();

    let fetched = scheduler.get(&schedule.name).await.unwrap();
    assert_eq!(fetched.fire_at, later);
}

#[tokio::test]
async fn update_after_fire_is_not_found() {
    let (scheduler, mut fired) = LocalScheduler::new();
    let schedule = schedule_for("ep-1", 10);
    scheduler.create(schedule.clone()).await.unwrap();

    let payload = timeout(Duration::from_secs(2), fired.recv())
        .await
        .expect("schedule should fire")
        .expect("channel open");
    assert_eq!(payload.endpoint_name, "ep-1");

    let err = scheduler
        .update_fire_at(&schedule.name, Utc::now() + chrono::Duration::minutes(30))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn fires_exactly_once_with_payload() {
    let (scheduler, mut fired) = LocalScheduler::new();
    scheduler.create(schedule_for("ep-1", 10)).await.unwrap();

    let payload = timeout(Duration::from_secs(2), fired.recv())
        .await
        .expect("schedule should fire")
        .expect("channel open");
    assert_eq!(payload.endpoint_name, "ep-1");

    // Schedule deleted itself on fire; no second delivery pending.
    assert!(scheduler.get(&Schedule::shutdown_name("ep-1")).await.is_err());
    let second = timeout(Duration::from_millis(100), fired.recv()).await;
    assert!(second.is_err());
}

#[tokio::test]
async fn extension_defers_firing() {
    let (scheduler, mut fired) = LocalScheduler::new();
    let schedule = schedule_for("ep-1", 50);
    scheduler.create(schedule.clone()).await.unwrap();

    // Push the deadline out before the first one elapses.
    scheduler
        .update_fire_at(&schedule.name, Utc::now() + chrono::Duration::milliseconds(300))
        .await
        .unwrap();

    // Nothing fires at the original deadline.
    assert!(timeout(Duration::from_millis(150), fired.recv()).await.is_err());

    // Fires at the extended deadline.
    let payload = timeout(Duration::from_secs(2), fired.recv())
        .await
        .expect("schedule should fire after extension")
        .expect("channel open");
    assert_eq!(payload.endpoint_name, "ep-1");
}

#[tokio::test]
async fn mock_fire_removes_schedule() {
    let scheduler = MockScheduler::new();
    scheduler.create(schedule_for("ep-1", 60_000)).await.unwrap();
    assert_eq!(scheduler.len(), 1);

    let payload = scheduler.fire(&Schedule::shutdown_name("ep-1")).unwrap();
    assert_eq!(payload.endpoint_name, "ep-1");
    assert!(scheduler.is_empty());
}
