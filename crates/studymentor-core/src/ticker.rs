//! Periodic tick sources.
//!
//! The timer and the stopwatch are advanced by a [`Ticker`] rather than by
//! sleeping themselves. Production code binds them to [`IntervalTicker`]
//! (a tokio interval); tests use [`ManualTicker`] and fire ticks by hand.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Whether a tick callback wants to keep receiving ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

pub type TickCallback = Box<dyn FnMut() -> TickFlow + Send>;

/// Start/stop port for a once-per-period callback.
///
/// After `stop()` returns the callback is never invoked again.
pub trait Ticker: Send {
    /// Begin invoking `on_tick`. Ignored while already active.
    fn start(&mut self, on_tick: TickCallback);
    fn stop(&mut self);
    fn is_active(&self) -> bool;
}

/// Ticks on a tokio interval. Must be started from within a tokio runtime.
pub struct IntervalTicker {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, mut on_tick: TickCallback) {
        if self.is_active() {
            return;
        }
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            // First tick one full period after start, not immediately.
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if on_tick() == TickFlow::Stop {
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ticker fired explicitly with [`ManualTicker::advance`].
#[derive(Default)]
pub struct ManualTicker {
    on_tick: Option<TickCallback>,
    fired: u64,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire up to `ticks` ticks; stops early when the callback asks to.
    /// Returns how many ticks were delivered.
    pub fn advance(&mut self, ticks: u64) -> u64 {
        let mut delivered = 0;
        while delivered < ticks {
            let Some(on_tick) = self.on_tick.as_mut() else {
                break;
            };
            delivered += 1;
            self.fired += 1;
            if on_tick() == TickFlow::Stop {
                self.on_tick = None;
            }
        }
        delivered
    }

    /// Total ticks delivered over the ticker's lifetime.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, on_tick: TickCallback) {
        if self.on_tick.is_none() {
            self.on_tick = Some(on_tick);
        }
    }

    fn stop(&mut self) {
        self.on_tick = None;
    }

    fn is_active(&self) -> bool {
        self.on_tick.is_some()
    }
}
