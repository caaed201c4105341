//! Daily study counters.
//!
//! Persisted under the day-scoped `daily-stats` key, so the counters start
//! from zero on the first load of a new calendar day.

use serde::{Deserialize, Serialize};

/// Today's completed pomodoros and total studied minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub sessions_completed: u32,
    pub total_minutes: u64,
}

/// Accumulates [`DailyStats`] from timer completions and logged time.
///
/// Each call represents one real event; callers must not repeat a call for
/// the same event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsAccumulator {
    stats: DailyStats,
}

impl StatsAccumulator {
    pub fn from_stats(stats: DailyStats) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> DailyStats {
        self.stats
    }

    pub fn sessions_completed(&self) -> u32 {
        self.stats.sessions_completed
    }

    pub fn total_minutes(&self) -> u64 {
        self.stats.total_minutes
    }

    /// Manually logged or stopwatch time. Does not count as a pomodoro.
    pub fn record_session(&mut self, minutes: u64) {
        self.stats.total_minutes = self.stats.total_minutes.saturating_add(minutes);
    }

    /// A finished work phase.
    pub fn record_pomodoro(&mut self, minutes: u64) {
        self.stats.sessions_completed = self.stats.sessions_completed.saturating_add(1);
        self.stats.total_minutes = self.stats.total_minutes.saturating_add(minutes);
    }

    /// `Xh Ym` rendering of the total.
    pub fn total_time_display(&self) -> String {
        crate::format::hours_minutes(self.stats.total_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_time_does_not_count_as_pomodoro() {
        let mut acc = StatsAccumulator::default();
        acc.record_session(2);
        assert_eq!(acc.sessions_completed(), 0);
        assert_eq!(acc.total_minutes(), 2);

        acc.record_pomodoro(25);
        assert_eq!(acc.sessions_completed(), 1);
        assert_eq!(acc.total_minutes(), 27);
        assert_eq!(acc.total_time_display(), "0h 27m");
    }

    #[test]
    fn stats_json_shape() {
        let stats = DailyStats {
            sessions_completed: 3,
            total_minutes: 75,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["sessionsCompleted"], 3);
        assert_eq!(json["totalMinutes"], 75);
    }
}
