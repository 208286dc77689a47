//! Channel-based gating over tokio mpsc.
//!
//! Wraps a [`FlickerSuppressor`] in a spawned task so a push-based producer
//! can be filtered live: raw values arrive on an input channel, the filtered
//! sequence leaves on an output channel, and the pending hide deadline is
//! honoured with the tokio timer. Works under paused virtual time in tests
//! because the suppressor is driven by [`TokioClock`].

use crate::application::suppressor::FlickerSuppressor;
use crate::domain::config::GateConfig;
use crate::infrastructure::clock::TokioClock;
use std::future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Output channel capacity. Small: the gate never emits faster than it
/// consumes, and backpressure on the consumer should reach the producer.
const OUTPUT_BUFFER: usize = 16;

/// A running flicker gate between two channels.
///
/// Items are `Result<bool, E>` so upstream failures pass through unchanged:
/// an `Err` from the producer cancels any pending hide and is forwarded
/// downstream as the final item. Closing the input channel completes the
/// gate, flushing a still-pending hide first. Dropping the output receiver
/// tears the task down.
///
/// # Examples
///
/// ```no_run
/// use flicker_gate::{GateConfig, SignalGate};
/// use tokio::sync::mpsc;
///
/// # async fn demo() {
/// let (tx, rx) = mpsc::channel::<Result<bool, std::io::Error>>(16);
/// let mut gate = SignalGate::spawn(GateConfig::default(), rx);
///
/// tx.send(Ok(true)).await.unwrap();
/// // ... loading finishes quickly; the matching `false` is held back so the
/// // spinner stays visible for the configured dwell time.
/// tx.send(Ok(false)).await.unwrap();
/// drop(tx);
///
/// while let Some(value) = gate.recv().await {
///     println!("visible: {:?}", value);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct SignalGate<E> {
    output: mpsc::Receiver<Result<bool, E>>,
    task: JoinHandle<()>,
}

impl<E: Send + 'static> SignalGate<E> {
    /// Spawn a gate with the given configuration, clocked by the tokio timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: GateConfig, input: mpsc::Receiver<Result<bool, E>>) -> Self {
        let suppressor = FlickerSuppressor::new(config, Arc::new(TokioClock::new()));
        Self::spawn_with(suppressor, input)
    }

    /// Spawn a gate around an existing suppressor.
    ///
    /// The suppressor's clock must agree with the tokio timer for deadlines
    /// to fire on time; [`TokioClock`] is the intended choice.
    pub fn spawn_with(
        mut suppressor: FlickerSuppressor,
        mut input: mpsc::Receiver<Result<bool, E>>,
    ) -> Self {
        let (tx, output) = mpsc::channel(OUTPUT_BUFFER);
        let task = tokio::spawn(async move {
            loop {
                let deadline = suppressor.next_deadline();
                tokio::select! {
                    // Input beats an expiring timer on exact ties, matching
                    // the suppressor's own ordering rules.
                    biased;
                    msg = input.recv() => match msg {
                        Some(Ok(value)) => {
                            for event in suppressor.push(value) {
                                if tx.send(Ok(event.value)).await.is_err() {
                                    debug!("output receiver dropped, stopping gate");
                                    suppressor.abort();
                                    return;
                                }
                            }
                        }
                        Some(Err(err)) => {
                            suppressor.abort();
                            if tx.send(Err(err)).await.is_err() {
                                debug!("output receiver dropped before error delivery");
                            }
                            return;
                        }
                        None => {
                            for event in suppressor.finish() {
                                if tx.send(Ok(event.value)).await.is_err() {
                                    return;
                                }
                            }
                            return;
                        }
                    },
                    _ = sleep_until_deadline(deadline) => {
                        for event in suppressor.poll() {
                            if tx.send(Ok(event.value)).await.is_err() {
                                debug!("output receiver dropped, stopping gate");
                                suppressor.abort();
                                return;
                            }
                        }
                    }
                }
            }
        });
        Self { output, task }
    }

    /// Receive the next filtered value.
    ///
    /// Returns `None` once the gate has completed and all emissions were
    /// delivered.
    pub async fn recv(&mut self) -> Option<Result<bool, E>> {
        self.output.recv().await
    }

    /// Take the raw output channel and the task handle.
    pub fn into_parts(self) -> (mpsc::Receiver<Result<bool, E>>, JoinHandle<()>) {
        (self.output, self.task)
    }
}

/// Sleep until the suppressor's next deadline, or forever if none is set.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_gate_holds_false_until_dwell_elapses() {
        let (tx, rx) = mpsc::channel::<Result<bool, Infallible>>(16);
        let mut gate = SignalGate::spawn(GateConfig::default(), rx);
        let start = tokio::time::Instant::now();

        tx.send(Ok(true)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3)).await;
        tx.send(Ok(false)).await.unwrap();

        assert_eq!(gate.recv().await, Some(Ok(true)));
        assert_eq!(gate.recv().await, Some(Ok(false)));
        // true became visible 1ms in; the false surfaces at the 200ms mark.
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_passes_through_and_cancels_pending_hide() {
        let (tx, rx) = mpsc::channel::<Result<bool, &str>>(16);
        let mut gate = SignalGate::spawn(GateConfig::default(), rx);

        tx.send(Ok(true)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3)).await;
        tx.send(Ok(false)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(Err("upstream broke")).await.unwrap();

        assert_eq!(gate.recv().await, Some(Ok(true)));
        assert_eq!(gate.recv().await, Some(Err("upstream broke")));
        // The deferred false never surfaces.
        assert_eq!(gate.recv().await, None);
    }
}
