//! The one-second heartbeat driving the countdown.
//!
//! A started ticker spawns a single tokio task that sends one [`Tick`] per
//! period into a capacity-1 channel, so at most one tick is ever
//! outstanding. Stopping aborts the task and bumps the epoch; a tick that
//! was already queued when `stop()` ran fails the [`Ticker::is_current`]
//! check and gets dropped by the consumer, which is what rules out stray
//! decrements after a pause or reset.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Fixed heartbeat period: one decrement per second.
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// A payload-free heartbeat, stamped with the tick stream it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub epoch: u64,
}

/// Repeating tick source. `start()` and `stop()` are idempotent.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    tx: mpsc::Sender<Tick>,
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Create a stopped ticker and the receiving end of its tick stream.
    pub fn new(period: Duration) -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(1);
        (
            Self {
                period,
                tx,
                epoch: 0,
                task: None,
            },
            rx,
        )
    }

    /// Begin emitting ticks. No effect while already active.
    pub fn start(&mut self) {
        if self.is_active() {
            return;
        }
        self.epoch += 1;
        let epoch = self.epoch;
        let tx = self.tx.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick resolves immediately; consume it so
            // the first delivered heartbeat lands one full period in.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick { epoch }).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Cease emitting ticks. No effect while already stopped.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        // Anything still queued belongs to the old stream.
        self.epoch += 1;
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Whether a received tick belongs to the live stream.
    pub fn is_current(&self, tick: Tick) -> bool {
        self.is_active() && tick.epoch == self.epoch
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
