//! End-to-end lifecycle flow over the public API, with the real in-process
//! scheduler driving shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use standby::lifecycle::{LifecycleConfig, LifecycleCoordinator, StartOutcome};
use standby::notify::MockNotifier;
use standby::provision::{MockInferenceClient, MockProvisioner};
use standby::schedule::LocalScheduler;
use standby::store::{EndpointStatus, MemoryStateStore, StateStore};

const MODEL_ID: &str = "sentiment-model";

fn short_config(idle: Duration, threshold: Duration) -> LifecycleConfig {
    LifecycleConfig {
        idle_window: idle,
        extend_threshold: threshold,
        ..LifecycleConfig::default()
    }
}

#[tokio::test]
async fn timer_fire_tears_down_and_resets() {
    let store = Arc::new(MemoryStateStore::new());
    let provisioner = Arc::new(MockProvisioner::new());
    let notifier = Arc::new(MockNotifier::new());
    let (scheduler, mut fired_rx) = LocalScheduler::new();

    let coordinator = Arc::new(LifecycleCoordinator::new(
        short_config(Duration::from_millis(200), Duration::from_millis(50)),
        Arc::clone(&store) as Arc<dyn StateStore>,
        Arc::clone(&provisioner) as _,
        Arc::new(scheduler),
        Arc::clone(&notifier) as _,
        Arc::new(MockInferenceClient::new()),
    ));

    let endpoint = match coordinator.request_start("Ann", "555-0100").await.unwrap() {
        StartOutcome::DeploymentStarted { endpoint_name } => endpoint_name,
        other => panic!("unexpected outcome {other:?}"),
    };
    coordinator.handle_ready(&endpoint).await.unwrap();

    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(
        store.get(MODEL_ID).await.unwrap().status,
        EndpointStatus::InService
    );

    // The idle timer fires on its own; drive the payload into the shutdown
    // executor the way the server's drain loop does.
    let payload = timeout(Duration::from_secs(2), fired_rx.recv())
        .await
        .expect("idle timer should fire")
        .expect("channel open");
    assert_eq!(payload.endpoint_name, endpoint);

    coordinator
        .handle_shutdown(&payload.endpoint_name)
        .await
        .unwrap();

    let record = store.get(MODEL_ID).await.unwrap();
    assert_eq!(record.status, EndpointStatus::Stopped);
    assert!(record.endpoint_name.is_none());
    assert!(record.schedule_name.is_none());
    assert_eq!(provisioner.deleted_names(), vec![endpoint]);

    // The cycle can start again.
    let outcome = coordinator.request_start("Bea", "555-0101").await.unwrap();
    assert!(matches!(outcome, StartOutcome::DeploymentStarted { .. }));
    assert_eq!(provisioner.create_calls(), 2);
}

#[tokio::test]
async fn usage_defers_the_real_timer() {
    let store = Arc::new(MemoryStateStore::new());
    let provisioner = Arc::new(MockProvisioner::new());
    let (scheduler, mut fired_rx) = LocalScheduler::new();

    // Every usage lands under the threshold, so each check re-arms the full
    // window.
    let coordinator = Arc::new(LifecycleCoordinator::new(
        short_config(Duration::from_millis(400), Duration::from_millis(400)),
        Arc::clone(&store) as Arc<dyn StateStore>,
        Arc::clone(&provisioner) as _,
        Arc::new(scheduler),
        Arc::new(MockNotifier::new()),
        Arc::new(MockInferenceClient::new()),
    ));

    let endpoint = match coordinator.request_start("Ann", "555-0100").await.unwrap() {
        StartOutcome::DeploymentStarted { endpoint_name } => endpoint_name,
        other => panic!("unexpected outcome {other:?}"),
    };
    coordinator.handle_ready(&endpoint).await.unwrap();

    // Keep the endpoint busy across more than one original window.
    for _ in 0..5 {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let check = coordinator.check_usage().await.unwrap();
        assert!(check.running);
    }

    // Still alive: the timer kept getting deferred.
    assert_eq!(
        store.get(MODEL_ID).await.unwrap().status,
        EndpointStatus::InService
    );

    // Once usage stops, the timer finally fires.
    let payload = timeout(Duration::from_secs(2), fired_rx.recv())
        .await
        .expect("idle timer should fire after usage stops")
        .expect("channel open");
    assert_eq!(payload.endpoint_name, endpoint);
}
