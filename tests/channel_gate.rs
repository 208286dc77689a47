//! End-to-end tests for the tokio channel gate under paused virtual time.

#![cfg(feature = "async")]

use flicker_gate::{GateConfig, SignalGate};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

type Item = Result<bool, Infallible>;

#[tokio::test(start_paused = true)]
async fn true_shows_immediately_and_false_waits_for_the_dwell() {
    let (tx, rx) = mpsc::channel::<Item>(16);
    let mut gate = SignalGate::spawn(GateConfig::default(), rx);
    let start = Instant::now();

    tx.send(Ok(true)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(3)).await;
    tx.send(Ok(false)).await.unwrap();

    assert_eq!(gate.recv().await, Some(Ok(true)));
    assert_eq!(gate.recv().await, Some(Ok(false)));
    assert_eq!(start.elapsed(), Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn slow_false_adds_no_delay() {
    let (tx, rx) = mpsc::channel::<Item>(16);
    let mut gate = SignalGate::spawn(GateConfig::default(), rx);
    let start = Instant::now();

    tx.send(Ok(true)).await.unwrap();
    assert_eq!(gate.recv().await, Some(Ok(true)));

    tokio::time::sleep(Duration::from_millis(300)).await;
    tx.send(Ok(false)).await.unwrap();
    assert_eq!(gate.recv().await, Some(Ok(false)));

    // Audit granularity only, no dwell deferral.
    assert_eq!(start.elapsed(), Duration::from_millis(302));
}

#[tokio::test(start_paused = true)]
async fn new_true_cancels_the_pending_hide() {
    let (tx, rx) = mpsc::channel::<Item>(16);
    let mut gate = SignalGate::spawn(GateConfig::default(), rx);
    let start = Instant::now();

    tx.send(Ok(true)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(Ok(false)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    tx.send(Ok(true)).await.unwrap();

    assert_eq!(gate.recv().await, Some(Ok(true)));
    assert_eq!(gate.recv().await, Some(Ok(true)));
    assert_eq!(start.elapsed(), Duration::from_millis(61));

    // The cancelled hide never surfaces; the gate completes cleanly.
    drop(tx);
    assert_eq!(gate.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn closing_the_input_flushes_the_pending_hide() {
    let (tx, rx) = mpsc::channel::<Item>(16);
    let mut gate = SignalGate::spawn(GateConfig::default(), rx);
    let start = Instant::now();

    tx.send(Ok(true)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(3)).await;
    tx.send(Ok(false)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    drop(tx);

    assert_eq!(gate.recv().await, Some(Ok(true)));
    // Flushed at completion time, well before the 200ms deadline.
    assert_eq!(gate.recv().await, Some(Ok(false)));
    assert_eq!(start.elapsed(), Duration::from_millis(13));
    assert_eq!(gate.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn upstream_error_passes_through_unchanged() {
    let (tx, rx) = mpsc::channel::<Result<bool, String>>(16);
    let mut gate = SignalGate::spawn(GateConfig::default(), rx);

    tx.send(Ok(true)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(3)).await;
    tx.send(Ok(false)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    tx.send(Err("connection reset".to_string())).await.unwrap();

    assert_eq!(gate.recv().await, Some(Ok(true)));
    assert_eq!(gate.recv().await, Some(Err("connection reset".to_string())));
    // Teardown cancelled the deferred hide.
    assert_eq!(gate.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn bursts_are_collapsed_before_the_rule_runs() {
    let config = GateConfig::new(Duration::from_millis(10), Duration::from_millis(200)).unwrap();
    let (tx, rx) = mpsc::channel::<Item>(16);
    let mut gate = SignalGate::spawn(config, rx);
    let start = Instant::now();

    // Flapping inside one 10ms window: only the trailing value counts.
    tx.send(Ok(true)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    tx.send(Ok(false)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    tx.send(Ok(true)).await.unwrap();

    assert_eq!(gate.recv().await, Some(Ok(true)));
    assert_eq!(start.elapsed(), Duration::from_millis(10));

    drop(tx);
    assert_eq!(gate.recv().await, None);
}
