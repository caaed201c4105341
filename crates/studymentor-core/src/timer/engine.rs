//! Timer engine implementation.
//!
//! The timer engine is a one-second countdown state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once per
//! elapsed second while the timer runs (see [`crate::ticker`]).
//!
//! ## Phase Cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//! ```
//!
//! A long break follows every work completion whose daily count is a
//! multiple of `sessions_until_long_break`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerConfig::default());
//! engine.start();
//! // Once per second:
//! engine.tick(&mut stats); // Some(Event::PhaseCompleted { .. }) at zero
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::TimerConfig;
use crate::events::{Celebration, Event};
use crate::stats::StatsAccumulator;

/// Grace period between a phase completion and an automatic start, so the
/// completion notice can be seen first.
pub const AUTO_START_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work Session",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub running: bool,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
}

impl TimerEngine {
    /// Create a stopped engine at the start of a work phase.
    pub fn new(config: TimerConfig) -> Self {
        let remaining_secs = config.phase_secs(Phase::Work);
        Self {
            config,
            state: TimerState {
                phase: Phase::Work,
                remaining_secs,
                running: false,
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// `MM:SS` of the remaining time.
    pub fn display(&self) -> String {
        crate::format::countdown(self.state.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            label: self.state.phase.label().to_string(),
            remaining_secs: self.state.remaining_secs,
            display: self.display(),
            running: self.state.running,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. `None` when already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        Some(Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down, keeping the remaining time. `None` when stopped.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        Some(Event::TimerPaused {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and return to a full work phase.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState {
            phase: Phase::Work,
            remaining_secs: self.config.phase_secs(Phase::Work),
            running: false,
        };
        Event::TimerReset {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Replace the configuration. The running countdown keeps its remaining
    /// time; new durations apply from the next reset or phase entry.
    pub fn set_config(&mut self, config: TimerConfig) {
        self.config = config;
    }

    /// Advance one second. Returns `None` while stopped.
    ///
    /// Completing a work phase records a pomodoro in `stats`; the caller is
    /// responsible for persisting it.
    pub fn tick(&mut self, stats: &mut StatsAccumulator) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            return Some(Event::TimerTicked {
                phase: self.state.phase,
                remaining_secs: self.state.remaining_secs,
            });
        }
        Some(self.complete_phase(stats))
    }

    /// The celebration matching a completion event produced by [`tick`].
    ///
    /// [`tick`]: TimerEngine::tick
    pub fn celebration_for(event: &Event) -> Option<Celebration> {
        match event {
            Event::PhaseCompleted {
                finished: Phase::Work,
                next,
                ..
            } => Some(Celebration::WorkSessionComplete {
                long_break: *next == Phase::LongBreak,
            }),
            Event::PhaseCompleted { .. } => Some(Celebration::BreakOver),
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self, stats: &mut StatsAccumulator) -> Event {
        let finished = self.state.phase;
        let next = match finished {
            Phase::Work => {
                stats.record_pomodoro(u64::from(self.config.work_minutes));
                let every = self.config.sessions_until_long_break.max(1);
                if stats.sessions_completed() % every == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };

        self.state = TimerState {
            phase: next,
            remaining_secs: self.config.phase_secs(next),
            running: false,
        };
        tracing::info!(?finished, ?next, "timer phase completed");

        Event::PhaseCompleted {
            finished,
            next,
            sessions_completed: stats.sessions_completed(),
            auto_start: self.config.auto_start_breaks,
            at: Utc::now(),
        }
    }
}
