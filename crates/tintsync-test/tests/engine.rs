//! Debounce, coalescing and lifecycle of the background worker.
//!
//! All tests run on a paused clock, so sleeps advance virtual time only.

use std::time::Duration;

use serde_json::json;
use tintsync::settings::OWNER_MARKER_KEY;
use tintsync::{EngineConfig, GuardConfig, ReconcileOutcome};
use tintsync_test::{doc, Harness};
use tokio::time::sleep;

fn config() -> EngineConfig {
    EngineConfig {
        debounce: Duration::from_millis(75),
        guard: GuardConfig::default(),
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn burst_of_requests_runs_one_reconcile() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(config());

    for _ in 0..5 {
        engine.request_reconcile(false);
    }
    sleep(ms(200)).await;

    assert_eq!(engine.status().reconcile_count, 1);
    assert_eq!(harness.store.write_count(), 1);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn nothing_runs_before_the_debounce_elapses() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(config());

    engine.request_reconcile(false);
    sleep(ms(50)).await;
    assert_eq!(engine.status().reconcile_count, 0);

    sleep(ms(50)).await;
    assert_eq!(engine.status().reconcile_count, 1);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn new_request_restarts_the_debounce() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(config());

    engine.request_reconcile(false);
    sleep(ms(50)).await;
    engine.request_reconcile(false);
    sleep(ms(50)).await;
    // The first window would have closed at 75ms.
    assert_eq!(engine.status().reconcile_count, 0);

    sleep(ms(50)).await;
    assert_eq!(engine.status().reconcile_count, 1);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn force_is_sticky_within_the_window() {
    let tampered = doc(json!({
        "[Default Dark Modern]": { "statusBar.background": "#FF0000" },
    }));
    let harness = Harness::with_document("/work/alpha", tampered);
    let engine = harness.engine(config());

    engine.request_reconcile(false);
    engine.request_reconcile(true);
    engine.request_reconcile(false);
    sleep(ms(200)).await;

    assert_eq!(engine.status().reconcile_count, 1);
    assert!(harness.store.document().contains_key(OWNER_MARKER_KEY));
    assert!(!engine.status().customized_outside_owner);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn unforced_requests_respect_tampering() {
    let tampered = doc(json!({
        "[Default Dark Modern]": { "statusBar.background": "#FF0000" },
    }));
    let harness = Harness::with_document("/work/alpha", tampered.clone());
    let engine = harness.engine(config());

    engine.request_reconcile(false);
    sleep(ms(200)).await;

    assert!(engine.status().customized_outside_owner);
    assert_eq!(harness.store.document(), tampered);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_the_pending_reconcile() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(config());

    engine.request_reconcile(false);
    engine.cancel_pending();
    sleep(ms(500)).await;

    assert_eq!(engine.status().reconcile_count, 0);
    assert_eq!(harness.store.write_count(), 0);

    // The worker keeps serving later requests.
    engine.request_reconcile(false);
    sleep(ms(100)).await;
    assert_eq!(engine.status().reconcile_count, 1);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_drops_pending_work() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(config());

    engine.request_reconcile(false);
    engine.shutdown().await;
    sleep(ms(500)).await;

    assert_eq!(harness.store.write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn reconcile_now_skips_the_debounce() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(config());

    assert_eq!(engine.reconcile_now(false).await, ReconcileOutcome::Written);
    assert_eq!(engine.reconcile_now(false).await, ReconcileOutcome::Unchanged);
    assert_eq!(engine.status().reconcile_count, 2);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_each_reconcile() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(config());
    let mut status = engine.subscribe();

    engine.request_reconcile(false);
    status.changed().await.unwrap();
    {
        let current = status.borrow_and_update();
        assert_eq!(current.reconcile_count, 1);
        assert_eq!(current.workspace_identifier.as_deref(), Some("/work/alpha"));
        assert_eq!(current.tint_colors.len(), 3);
    }

    harness.host.update_config(|c| c.enabled = false);
    engine.request_reconcile(false);
    status.changed().await.unwrap();
    assert_eq!(status.borrow().reconcile_count, 2);
    assert!(status.borrow().tint_colors.is_empty());
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn engine_guard_is_armed() {
    let harness = Harness::new("/work/alpha");
    let engine = harness.engine(EngineConfig {
        debounce: ms(10),
        guard: GuardConfig {
            window: Duration::from_secs(3),
            max_writes: 2,
            cooldown: Duration::from_secs(10),
        },
    });

    for seed in 1..=3 {
        harness.host.update_config(|c| c.seed = seed);
        engine.request_reconcile(false);
        sleep(ms(50)).await;
    }

    assert_eq!(harness.store.write_count(), 2);
    assert!(engine.status().last_error.is_some());
    engine.shutdown().await;
}
