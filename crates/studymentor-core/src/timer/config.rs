use serde::{Deserialize, Serialize};

use super::engine::Phase;
use crate::error::ValidationError;

/// Pomodoro durations and behavior switches.
///
/// Persisted as JSON under the `timer-settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
    /// Start the next phase on its own after a completion.
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default = "default_true")]
    pub play_sound: bool,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_sessions_until_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_until_long_break: default_sessions_until_long_break(),
            auto_start_breaks: false,
            play_sound: true,
        }
    }
}

impl TimerConfig {
    /// Reject zero durations and a zero long-break cadence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("workMinutes", self.work_minutes),
            ("shortBreakMinutes", self.short_break_minutes),
            ("longBreakMinutes", self.long_break_minutes),
            ("sessionsUntilLongBreak", self.sessions_until_long_break),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ValidationError::NonPositive {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn phase_minutes(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        }
    }

    pub fn phase_secs(&self, phase: Phase) -> u64 {
        u64::from(self.phase_minutes(phase)).saturating_mul(60)
    }
}
