//! # StudyMentor Core Library
//!
//! This library provides the core logic for the StudyMentor study planner.
//! All operations are exposed through the standalone `studymentor` CLI, which
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A one-second countdown state machine; the caller
//!   drives it through a [`Ticker`]
//! - **Session Tracker**: A free-running stopwatch for study sessions
//! - **Goals & Stats**: Today's goal list and counters, reset by day key
//! - **Storage**: SQLite key/value persistence and TOML configuration
//! - **API**: Async client for the remote mentor service (chat, roadmaps,
//!   progress)
//!
//! ## Key Components
//!
//! - [`StudyApp`]: Controller owning all mutable state
//! - [`Driver`]: Binds a shared [`StudyApp`] to periodic tickers
//! - [`TimerEngine`]: Pomodoro state machine
//! - [`PersistenceStore`]: Day-scoped JSON persistence
//! - [`ApiClient`]: Remote API client

pub mod api;
pub mod app;
pub mod clock;
pub mod driver;
pub mod error;
pub mod events;
pub mod format;
pub mod goals;
pub mod mode;
pub mod notify;
pub mod session;
pub mod stats;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use api::ApiClient;
pub use app::{ExportDocument, ProgressSync, SessionSummary, StudyApp};
pub use clock::{Clock, DayKey, ManualClock, SystemClock};
pub use driver::{Driver, SharedApp};
pub use error::{ApiError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::{Celebration, Event};
pub use goals::{Goal, GoalLedger};
pub use mode::{Mode, Preferences};
pub use session::SessionTracker;
pub use stats::{DailyStats, StatsAccumulator};
pub use storage::{ApiSettings, AppConfig, Database, PersistenceStore};
pub use ticker::{IntervalTicker, ManualTicker, Ticker};
pub use timer::{Phase, TimerConfig, TimerEngine, TimerState};
