//! Application controller.
//!
//! [`StudyApp`] owns every piece of mutable state (timer, stopwatch, goals,
//! stats, mode, roadmap, chat) and is passed by reference to whoever drives
//! it. Every mutating operation persists the affected slot before it
//! returns, so a crash never loses more than the in-flight second.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::types::{
    Ack, GoalAdjustment, Progress, ProgressUpdate, Quote, RoadmapRecord, RoadmapRequest,
    RoadmapSet,
};
use crate::api::ApiClient;
use crate::clock::{Clock, DayKey, SystemClock};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::{Celebration, Event};
use crate::goals::{Goal, GoalLedger};
use crate::mode::{Mode, Preferences};
use crate::notify::{BellNotifier, Notifier, SilentNotifier};
use crate::session::SessionTracker;
use crate::stats::{DailyStats, StatsAccumulator};
use crate::storage::{keys, AppConfig, Database, PersistenceStore};
use crate::timer::{TimerConfig, TimerEngine};

/// Inline reply shown when the chat endpoint fails.
pub const CHAT_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";

/// Shown when the technique list cannot be fetched.
pub const TECHNIQUES_FALLBACK: &str = "Here are some effective study techniques: Pomodoro Technique (25-minute focused sessions), Active Recall (test yourself), Spaced Repetition (review at intervals), and the Feynman Technique (explain concepts simply). Would you like details on any of these?";

/// Task id used when logging free study time against a roadmap.
pub const SESSION_TASK_ID: &str = "session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Outcome of ending a stopwatch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub elapsed_secs: u64,
    /// Whole minutes credited to today's stats.
    pub minutes_logged: u64,
}

impl SessionSummary {
    pub fn to_event(&self, at: DateTime<Utc>) -> Event {
        Event::SessionEnded {
            elapsed_secs: self.elapsed_secs,
            minutes_logged: self.minutes_logged,
            at,
        }
    }
}

/// `stats` block of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStats {
    pub sessions: u32,
    /// Minutes.
    pub total_time: u64,
    pub date: DayKey,
}

/// Snapshot written by the export command. There is no import path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub goals: Vec<Goal>,
    pub stats: ExportStats,
    pub timer_settings: TimerConfig,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    /// `study-mentor-data-YYYY-MM-DD.json` for the export day.
    pub fn file_name(&self) -> String {
        format!("study-mentor-data-{}.json", self.stats.date)
    }
}

/// Roadmap-bound progress calls, detached from [`StudyApp`] so a caller
/// holding the app behind a lock can release it before awaiting.
#[derive(Debug, Clone)]
pub struct ProgressSync {
    api: ApiClient,
    roadmap_id: Option<String>,
}

impl ProgressSync {
    pub fn roadmap_id(&self) -> Option<&str> {
        self.roadmap_id.as_deref()
    }

    fn require_roadmap(&self) -> Result<&str> {
        self.roadmap_id.as_deref().ok_or(CoreError::NoActiveRoadmap)
    }

    /// Report `seconds` of study time (floored to minutes) to the server
    /// and hand back the refreshed progress when the server includes it.
    /// Local stats are not touched.
    pub async fn log_time(&self, seconds: u64) -> Result<(Option<Progress>, Celebration)> {
        let roadmap_id = self.require_roadmap()?;
        let minutes = seconds / 60;
        let reply = self
            .api
            .update_progress(&ProgressUpdate {
                roadmap_id: roadmap_id.to_string(),
                task_id: SESSION_TASK_ID.to_string(),
                completed: false,
                time_spent: minutes,
            })
            .await?;
        tracing::info!(roadmap_id, minutes, "logged study time");
        Ok((reply.progress, Celebration::TimeLogged { minutes }))
    }

    pub async fn complete_task(&self, task_id: &str, completed: bool) -> Result<Option<Progress>> {
        let roadmap_id = self.require_roadmap()?;
        let reply = self
            .api
            .update_progress(&ProgressUpdate {
                roadmap_id: roadmap_id.to_string(),
                task_id: task_id.to_string(),
                completed,
                time_spent: 0,
            })
            .await?;
        Ok(reply.progress)
    }

    pub async fn load_progress(&self) -> Result<Progress> {
        let roadmap_id = self.require_roadmap()?;
        Ok(self.api.get_progress(roadmap_id).await?)
    }
}

pub struct StudyApp {
    store: PersistenceStore,
    notifier: Box<dyn Notifier>,
    api: ApiClient,
    mode: Option<Mode>,
    preferences: Preferences,
    timer: TimerEngine,
    session: SessionTracker,
    goals: GoalLedger,
    stats: StatsAccumulator,
    roadmap_id: Option<String>,
    chat_history: Vec<ChatTurn>,
}

impl StudyApp {
    /// Restore state from `store`. Day-scoped slots written on another day
    /// load as empty.
    pub fn load(store: PersistenceStore, api: ApiClient) -> Result<Self> {
        let preferences: Preferences = store.load(keys::PREFERENCES)?.unwrap_or_default();
        let mode = if preferences.remember_mode {
            store.load(keys::CURRENT_MODE)?
        } else {
            None
        };
        let timer_config = match store.load::<TimerConfig>(keys::TIMER_SETTINGS)? {
            Some(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    tracing::warn!(error = %e, "stored timer settings rejected, using defaults");
                    TimerConfig::default()
                }
            },
            None => TimerConfig::default(),
        };
        let goals: GoalLedger = store
            .load_for_today(keys::DAILY_GOALS)?
            .unwrap_or_default();
        let stats: DailyStats = store
            .load_for_today(keys::DAILY_STATS)?
            .unwrap_or_default();
        let roadmap_id = store.load(keys::CURRENT_ROADMAP)?;

        tracing::debug!(
            goals = goals.total(),
            sessions = stats.sessions_completed,
            roadmap = roadmap_id.is_some(),
            "restored application state"
        );

        Ok(Self {
            store,
            notifier: Box::new(SilentNotifier),
            api,
            mode,
            preferences,
            timer: TimerEngine::new(timer_config),
            session: SessionTracker::new(),
            goals,
            stats: StatsAccumulator::from_stats(stats),
            roadmap_id,
            chat_history: Vec::new(),
        })
    }

    /// Open the on-disk database with the system clock and a terminal bell.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let db = Database::open()?;
        let store = PersistenceStore::new(db, Arc::new(SystemClock));
        let api = ApiClient::new(&config.api)?;
        Ok(Self::load(store, api)?.with_notifier(BellNotifier))
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    fn clock(&self) -> &Arc<dyn Clock> {
        self.store.clock()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn today(&self) -> DayKey {
        self.clock().today()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn session(&self) -> &SessionTracker {
        &self.session
    }

    pub fn goals(&self) -> &GoalLedger {
        &self.goals
    }

    pub fn stats(&self) -> &StatsAccumulator {
        &self.stats
    }

    pub fn roadmap_id(&self) -> Option<&str> {
        self.roadmap_id.as_deref()
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn progress_sync(&self) -> ProgressSync {
        ProgressSync {
            api: self.api.clone(),
            roadmap_id: self.roadmap_id.clone(),
        }
    }

    // ── Mode & preferences ───────────────────────────────────────────

    /// Switch mode and return its welcome message.
    pub fn select_mode(&mut self, mode: Mode) -> Result<&'static str> {
        self.mode = Some(mode);
        if self.preferences.remember_mode {
            self.store.save(keys::CURRENT_MODE, &mode)?;
        }
        tracing::info!(%mode, "mode selected");
        Ok(mode.welcome_message())
    }

    /// Flip between the two modes; an unset mode becomes Focus.
    pub fn toggle_mode(&mut self) -> Result<Mode> {
        let next = self.mode.map_or(Mode::Focus, |m| m.toggled());
        self.select_mode(next)?;
        Ok(next)
    }

    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<()> {
        self.store.save(keys::PREFERENCES, &preferences)?;
        if !preferences.remember_mode {
            self.store.remove(keys::CURRENT_MODE)?;
        } else if let Some(mode) = self.mode {
            self.store.save(keys::CURRENT_MODE, &mode)?;
        }
        self.preferences = preferences;
        Ok(())
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start_timer(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn reset_timer(&mut self) -> Event {
        self.timer.reset()
    }

    /// Advance the countdown one second.
    ///
    /// On a phase completion the stats are persisted, the notifier rings
    /// when enabled, and the matching celebration follows the completion
    /// event. Neither a storage nor a notifier failure stops the timer.
    pub fn tick_timer(&mut self) -> Vec<Event> {
        let Some(event) = self.timer.tick(&mut self.stats) else {
            return Vec::new();
        };
        let finished = match event {
            Event::PhaseCompleted { finished, .. } => finished,
            _ => return vec![event],
        };

        if !finished.is_break() {
            if let Err(e) = self.persist_stats() {
                tracing::error!(error = %e, "failed to persist daily stats");
            }
        }
        if self.timer.config().play_sound {
            if let Err(e) = self.notifier.notify(finished) {
                tracing::debug!(error = %e, "notification failed");
            }
        }

        let celebration = TimerEngine::celebration_for(&event);
        let mut events = vec![event];
        events.extend(celebration.map(|c| c.to_event()));
        events
    }

    /// Validate, persist, and apply new timer settings, then reset the
    /// timer to a full work phase. Invalid settings change nothing.
    pub fn save_timer_settings(&mut self, config: TimerConfig) -> Result<Celebration> {
        config.validate()?;
        self.store.save(keys::TIMER_SETTINGS, &config)?;
        self.timer.set_config(config);
        self.timer.reset();
        Ok(Celebration::SettingsSaved)
    }

    // ── Study session ────────────────────────────────────────────────

    pub fn begin_session(&mut self) -> Option<Event> {
        self.session.begin().then(|| Event::SessionStarted {
            at: self.clock().now_utc(),
        })
    }

    pub fn tick_session(&mut self) -> Option<Event> {
        self.session
            .tick()
            .map(|elapsed_secs| Event::SessionTicked { elapsed_secs })
    }

    /// Stop the stopwatch and credit whole minutes to today's stats.
    ///
    /// Reporting the time to the server is a separate step through
    /// [`ProgressSync::log_time`].
    pub fn end_session(&mut self) -> Result<SessionSummary> {
        let elapsed_secs = self.session.end();
        let minutes_logged = elapsed_secs / 60;
        if minutes_logged > 0 {
            self.stats.record_session(minutes_logged);
            self.persist_stats()?;
        }
        Ok(SessionSummary {
            elapsed_secs,
            minutes_logged,
        })
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn add_goal(&mut self, text: &str, minutes_planned: u32) -> Result<&Goal> {
        let now = self.clock().now_utc();
        let mut goals = self.goals.clone();
        goals.add(text, minutes_planned, now)?;
        self.store.save_for_today(keys::DAILY_GOALS, &goals)?;
        self.goals = goals;
        let last = self.goals.total() - 1;
        self.goals
            .get(last)
            .ok_or(CoreError::IndexOutOfRange {
                collection: "goals".into(),
                index: last,
                len: self.goals.total(),
            })
    }

    pub fn toggle_goal(&mut self, position: usize, completed: bool) -> Result<Option<Celebration>> {
        let mut goals = self.goals.clone();
        let celebration = goals.toggle(position, completed)?;
        self.store.save_for_today(keys::DAILY_GOALS, &goals)?;
        self.goals = goals;
        Ok(celebration)
    }

    pub fn remove_goal(&mut self, position: usize) -> Result<Goal> {
        let mut goals = self.goals.clone();
        let removed = goals.remove(position)?;
        self.store.save_for_today(keys::DAILY_GOALS, &goals)?;
        self.goals = goals;
        Ok(removed)
    }

    // ── Remote ───────────────────────────────────────────────────────

    /// Send a chat message in the current mode.
    ///
    /// Blank input yields `None`. A failed request yields the inline
    /// fallback text and leaves the history untouched.
    pub async fn send_chat(&mut self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let mode = self.mode.unwrap_or(Mode::Focus);
        match self.api.chat(message, mode).await {
            Ok(reply) => {
                self.chat_history.push(ChatTurn {
                    role: ChatRole::User,
                    content: message.to_string(),
                });
                self.chat_history.push(ChatTurn {
                    role: ChatRole::Assistant,
                    content: reply.response.clone(),
                });
                Some(reply.response)
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                Some(CHAT_FALLBACK.to_string())
            }
        }
    }

    /// Markdown list of study techniques, or a static hint when the
    /// server is unreachable.
    pub async fn study_techniques_message(&self) -> String {
        match self.api.study_techniques().await {
            Ok(techniques) => {
                let mut out = String::from("Here are some effective study techniques:\n");
                for t in techniques {
                    out.push_str(&format!("\n**{}**: {}\n", t.name, t.description));
                    for tip in t.tips {
                        out.push_str(&format!("  - {tip}\n"));
                    }
                }
                out
            }
            Err(e) => {
                tracing::warn!(error = %e, "study technique request failed");
                TECHNIQUES_FALLBACK.to_string()
            }
        }
    }

    pub async fn daily_motivation(&self) -> Result<Quote> {
        Ok(self.api.daily_motivation().await?)
    }

    /// Generate roadmap variants and make the new roadmap current.
    pub async fn generate_roadmap(&mut self, request: &RoadmapRequest) -> Result<RoadmapSet> {
        if request.learning_goal.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "learning_goal".into(),
                message: "must not be empty".into(),
            }
            .into());
        }
        if request.time_commitment == 0 {
            return Err(ValidationError::NonPositive {
                field: "time_commitment".into(),
            }
            .into());
        }
        let set = self.api.generate_roadmap(request).await?;
        self.store.save(keys::CURRENT_ROADMAP, &set.roadmap_id)?;
        self.roadmap_id = Some(set.roadmap_id.clone());
        tracing::info!(roadmap_id = %set.roadmap_id, variants = set.roadmaps.len(), "roadmap generated");
        Ok(set)
    }

    pub async fn get_roadmap(&self) -> Result<RoadmapRecord> {
        let id = self.require_roadmap()?;
        Ok(self.api.get_roadmap(id).await?)
    }

    pub async fn select_track(&self, track_type: &str) -> Result<(Ack, Celebration)> {
        let id = self.require_roadmap()?;
        let ack = self.api.select_track(id, track_type).await?;
        Ok((ack, Celebration::RoadmapSelected))
    }

    pub async fn load_progress(&self) -> Result<Progress> {
        self.progress_sync().load_progress().await
    }

    pub async fn complete_task(
        &self,
        task_id: &str,
        completed: bool,
    ) -> Result<(Option<Progress>, Option<Celebration>)> {
        let progress = self.progress_sync().complete_task(task_id, completed).await?;
        Ok((progress, completed.then_some(Celebration::TaskCompleted)))
    }

    pub async fn adjust_goals(
        &self,
        new_time_commitment: u32,
        new_deadline: Option<NaiveDate>,
    ) -> Result<(Ack, Celebration)> {
        if new_time_commitment == 0 {
            return Err(ValidationError::NonPositive {
                field: "new_time_commitment".into(),
            }
            .into());
        }
        let id = self.require_roadmap()?;
        let ack = self
            .api
            .adjust_goals(&GoalAdjustment {
                roadmap_id: id.to_string(),
                new_time_commitment,
                new_deadline,
            })
            .await?;
        Ok((ack, Celebration::GoalsAdjusted))
    }

    pub async fn log_time(&self, seconds: u64) -> Result<(Option<Progress>, Celebration)> {
        self.progress_sync().log_time(seconds).await
    }

    /// Credit manually entered time to today's stats, then report it.
    ///
    /// The local record stands even when the report fails.
    pub async fn log_manual_time(
        &mut self,
        hours: u32,
        minutes: u32,
    ) -> Result<(Option<Progress>, Celebration)> {
        let total = u64::from(hours) * 60 + u64::from(minutes);
        if total == 0 {
            return Err(ValidationError::NonPositive {
                field: "time".into(),
            }
            .into());
        }
        self.stats.record_session(total);
        self.persist_stats()?;
        self.log_time(total * 60).await
    }

    // ── Data ─────────────────────────────────────────────────────────

    pub fn export(&self) -> ExportDocument {
        let stats = self.stats.stats();
        ExportDocument {
            goals: self.goals.goals().to_vec(),
            stats: ExportStats {
                sessions: stats.sessions_completed,
                total_time: stats.total_minutes,
                date: self.today(),
            },
            timer_settings: self.timer.config().clone(),
            export_date: self.clock().now_utc(),
        }
    }

    /// Wipe every persisted slot and return to first-run state.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.mode = None;
        self.preferences = Preferences::default();
        self.timer = TimerEngine::new(TimerConfig::default());
        self.session = SessionTracker::new();
        self.goals = GoalLedger::default();
        self.stats = StatsAccumulator::default();
        self.roadmap_id = None;
        self.chat_history.clear();
        tracing::info!("cleared all data");
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_stats(&mut self) -> Result<()> {
        self.store
            .save_for_today(keys::DAILY_STATS, &self.stats.stats())
    }

    fn require_roadmap(&self) -> Result<&str> {
        self.roadmap_id.as_deref().ok_or(CoreError::NoActiveRoadmap)
    }
}
