//! Free-running study stopwatch.
//!
//! Independent of the timer engine; both may tick at the same time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTracker {
    elapsed_secs: u64,
    running: bool,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start from zero. Returns `false` (and changes nothing) when a session
    /// is already running.
    pub fn begin(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.elapsed_secs = 0;
        self.running = true;
        true
    }

    /// Count one second. `None` while stopped.
    pub fn tick(&mut self) -> Option<u64> {
        if !self.running {
            return None;
        }
        self.elapsed_secs += 1;
        Some(self.elapsed_secs)
    }

    /// Stop, hand back the elapsed seconds, and zero the stopwatch.
    pub fn end(&mut self) -> u64 {
        self.running = false;
        std::mem::take(&mut self.elapsed_secs)
    }

    pub fn display(&self) -> String {
        crate::format::stopwatch(self.elapsed_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_zeroes() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.tick().is_none());
        assert!(tracker.begin());
        for _ in 0..125 {
            tracker.tick();
        }
        assert_eq!(tracker.display(), "02:05");
        assert_eq!(tracker.end(), 125);
        assert_eq!(tracker.elapsed_secs(), 0);
        assert!(!tracker.is_running());
        assert!(tracker.tick().is_none());
    }

    #[test]
    fn begin_while_running_is_ignored() {
        let mut tracker = SessionTracker::new();
        tracker.begin();
        tracker.tick();
        tracker.tick();
        assert!(!tracker.begin());
        assert_eq!(tracker.elapsed_secs(), 2);
    }
}
