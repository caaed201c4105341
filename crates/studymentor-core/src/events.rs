use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the timer and session trackers produces an Event.
/// Front ends render them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        phase: Phase,
        remaining_secs: u64,
    },
    /// A countdown reached zero. The timer is stopped on the next phase;
    /// `auto_start` asks the driver to start it after
    /// [`crate::timer::AUTO_START_DELAY`].
    PhaseCompleted {
        finished: Phase,
        next: Phase,
        sessions_completed: u32,
        auto_start: bool,
        at: DateTime<Utc>,
    },
    SessionStarted {
        at: DateTime<Utc>,
    },
    SessionTicked {
        elapsed_secs: u64,
    },
    SessionEnded {
        elapsed_secs: u64,
        minutes_logged: u64,
        at: DateTime<Utc>,
    },
    Celebration {
        title: String,
        message: String,
    },
    StateSnapshot {
        phase: Phase,
        label: String,
        remaining_secs: u64,
        display: String,
        running: bool,
        at: DateTime<Utc>,
    },
}

/// Milestones worth a celebratory message in the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Celebration {
    AllGoalsCompleted,
    WorkSessionComplete { long_break: bool },
    BreakOver,
    TimeLogged { minutes: u64 },
    TaskCompleted,
    RoadmapSelected,
    GoalsAdjusted,
    SettingsSaved,
}

impl Celebration {
    pub fn title(&self) -> &'static str {
        match self {
            Celebration::AllGoalsCompleted => "🎊 All Goals Completed!",
            Celebration::WorkSessionComplete { .. } => "🎉 Work Session Complete!",
            Celebration::BreakOver => "⏰ Break Over!",
            Celebration::TimeLogged { .. } => "Time Logged! ⏱️",
            Celebration::TaskCompleted => "Task Completed! 🎉",
            Celebration::RoadmapSelected => "Roadmap Selected! 🎉",
            Celebration::GoalsAdjusted => "Goals Updated! 🎯",
            Celebration::SettingsSaved => "✅ Settings Saved",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Celebration::AllGoalsCompleted => {
                "Amazing work! You've completed all your goals for today!".into()
            }
            Celebration::WorkSessionComplete { long_break } => format!(
                "Great focus! Time for a {} break.",
                if *long_break { "long" } else { "short" }
            ),
            Celebration::BreakOver => "Ready to get back to work? Let's stay productive!".into(),
            Celebration::TimeLogged { minutes } => {
                format!("Great session! You studied for {minutes} minutes.")
            }
            Celebration::TaskCompleted => "Great work! Keep up the momentum!".into(),
            Celebration::RoadmapSelected => {
                "Your personalized learning path is ready. Let's start your journey!".into()
            }
            Celebration::GoalsAdjusted => {
                "Your learning plan has been adjusted to match your new schedule.".into()
            }
            Celebration::SettingsSaved => "Timer settings updated successfully!".into(),
        }
    }

    pub fn to_event(&self) -> Event {
        Event::Celebration {
            title: self.title().to_string(),
            message: self.message(),
        }
    }
}
