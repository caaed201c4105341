//! Binds a shared [`StudyApp`] to two [`Ticker`]s.
//!
//! The countdown and the stopwatch each get their own ticker. Every tick
//! takes the app lock, advances one second, and forwards the resulting
//! events on an unbounded channel. Pausing clears the `running` flag under
//! the same lock before stopping the ticker, so a tick racing the pause
//! observes a stopped state and produces nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::app::{SessionSummary, StudyApp};
use crate::error::Result;
use crate::events::Event;
use crate::ticker::{TickFlow, Ticker};
use crate::timer::AUTO_START_DELAY;

pub type SharedApp = Arc<Mutex<StudyApp>>;

/// Lock the app, recovering the guard if a previous holder panicked.
pub fn lock(app: &SharedApp) -> MutexGuard<'_, StudyApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Driver<T: Ticker> {
    app: SharedApp,
    timer_ticker: T,
    session_ticker: T,
    events: UnboundedSender<Event>,
}

impl<T: Ticker> Driver<T> {
    pub fn new(
        app: SharedApp,
        timer_ticker: T,
        session_ticker: T,
        events: UnboundedSender<Event>,
    ) -> Self {
        Self {
            app,
            timer_ticker,
            session_ticker,
            events,
        }
    }

    pub fn app(&self) -> &SharedApp {
        &self.app
    }

    pub fn timer_ticker(&self) -> &T {
        &self.timer_ticker
    }

    pub fn timer_ticker_mut(&mut self) -> &mut T {
        &mut self.timer_ticker
    }

    pub fn session_ticker_mut(&mut self) -> &mut T {
        &mut self.session_ticker
    }

    /// Delay before an automatic start, when `event` asks for one.
    pub fn auto_start_delay(event: &Event) -> Option<Duration> {
        match event {
            Event::PhaseCompleted {
                auto_start: true, ..
            } => Some(AUTO_START_DELAY),
            _ => None,
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Start the countdown. No-op while it is already running.
    pub fn start_timer(&mut self) {
        let Some(event) = lock(&self.app).start_timer() else {
            return;
        };
        self.emit(event);

        // A ticker that stopped itself on completion may still hold its
        // finished task.
        self.timer_ticker.stop();
        let app = Arc::clone(&self.app);
        let events = self.events.clone();
        self.timer_ticker.start(Box::new(move || {
            let (produced, running) = {
                let mut app = lock(&app);
                let produced = app.tick_timer();
                (produced, app.timer().is_running())
            };
            for event in produced {
                let _ = events.send(event);
            }
            if running {
                TickFlow::Continue
            } else {
                TickFlow::Stop
            }
        }));
    }

    pub fn pause_timer(&mut self) {
        let event = lock(&self.app).pause_timer();
        self.timer_ticker.stop();
        if let Some(event) = event {
            self.emit(event);
        }
    }

    pub fn reset_timer(&mut self) {
        let event = lock(&self.app).reset_timer();
        self.timer_ticker.stop();
        self.emit(event);
    }

    /// Wait `delay`, then start the countdown.
    pub async fn start_timer_after(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
        self.start_timer();
    }

    // ── Study session ────────────────────────────────────────────────

    /// Start the stopwatch. No-op while a session is running.
    pub fn begin_session(&mut self) {
        let Some(event) = lock(&self.app).begin_session() else {
            return;
        };
        self.emit(event);

        self.session_ticker.stop();
        let app = Arc::clone(&self.app);
        let events = self.events.clone();
        self.session_ticker.start(Box::new(move || {
            let ticked = lock(&app).tick_session();
            match ticked {
                Some(event) => {
                    let _ = events.send(event);
                    TickFlow::Continue
                }
                None => TickFlow::Stop,
            }
        }));
    }

    /// Stop the stopwatch and credit its time to today's stats.
    pub fn end_session(&mut self) -> Result<SessionSummary> {
        let summary = {
            let mut app = lock(&self.app);
            let summary = app.end_session();
            self.session_ticker.stop();
            summary?
        };
        self.emit(summary.to_event(chrono::Utc::now()));
        Ok(summary)
    }

    fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            tracing::debug!("event receiver dropped");
        }
    }
}

impl<T: Ticker> Drop for Driver<T> {
    fn drop(&mut self) {
        self.timer_ticker.stop();
        self.session_ticker.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::clock::SystemClock;
    use crate::storage::{ApiSettings, PersistenceStore};
    use crate::ticker::{IntervalTicker, ManualTicker};
    use crate::timer::{Phase, TimerConfig};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn shared_app(config: TimerConfig) -> SharedApp {
        let store = PersistenceStore::in_memory(Arc::new(SystemClock));
        let api = ApiClient::new(&ApiSettings::default()).unwrap();
        let mut app = StudyApp::load(store, api).unwrap();
        app.save_timer_settings(config).unwrap();
        Arc::new(Mutex::new(app))
    }

    fn one_minute(auto_start: bool) -> TimerConfig {
        TimerConfig {
            work_minutes: 1,
            short_break_minutes: 1,
            auto_start_breaks: auto_start,
            play_sound: false,
            ..TimerConfig::default()
        }
    }

    fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[test]
    fn pause_stops_ticks() {
        let (tx, mut rx) = unbounded_channel();
        let app = shared_app(one_minute(false));
        let mut driver = Driver::new(app.clone(), ManualTicker::new(), ManualTicker::new(), tx);

        driver.start_timer();
        assert_eq!(driver.timer_ticker_mut().advance(5), 5);
        driver.pause_timer();
        assert_eq!(driver.timer_ticker_mut().advance(5), 0);
        assert_eq!(lock(&app).timer().remaining_secs(), 55);

        let events = drain(&mut rx);
        assert!(matches!(events.first(), Some(Event::TimerStarted { .. })));
        assert!(matches!(events.last(), Some(Event::TimerPaused { remaining_secs: 55, .. })));
    }

    #[test]
    fn completion_stops_ticker_and_requests_auto_start() {
        let (tx, mut rx) = unbounded_channel();
        let app = shared_app(one_minute(true));
        let mut driver = Driver::new(app.clone(), ManualTicker::new(), ManualTicker::new(), tx);

        driver.start_timer();
        assert_eq!(driver.timer_ticker_mut().advance(120), 60);
        assert!(!driver.timer_ticker().is_active());

        let events = drain(&mut rx);
        let completions: Vec<_> = events
            .iter()
            .filter_map(|e| Driver::<ManualTicker>::auto_start_delay(e))
            .collect();
        assert_eq!(completions, vec![AUTO_START_DELAY]);
        assert_eq!(lock(&app).timer().phase(), Phase::ShortBreak);

        driver.start_timer();
        assert!(lock(&app).timer().is_running());
        assert_eq!(driver.timer_ticker_mut().advance(1), 1);
    }

    #[test]
    fn session_ticks_and_ends() {
        let (tx, mut rx) = unbounded_channel();
        let app = shared_app(TimerConfig::default());
        let mut driver = Driver::new(app.clone(), ManualTicker::new(), ManualTicker::new(), tx);

        driver.begin_session();
        driver.session_ticker_mut().advance(125);
        let summary = driver.end_session().unwrap();
        assert_eq!(summary.elapsed_secs, 125);
        assert_eq!(summary.minutes_logged, 2);
        assert_eq!(driver.session_ticker_mut().advance(3), 0);
        assert_eq!(lock(&app).stats().total_minutes(), 2);

        let events = drain(&mut rx);
        assert!(matches!(
            events.last(),
            Some(Event::SessionEnded {
                elapsed_secs: 125,
                minutes_logged: 2,
                ..
            })
        ));
    }

    #[test]
    fn timer_and_session_run_independently() {
        let (tx, _rx) = unbounded_channel();
        let app = shared_app(TimerConfig::default());
        let mut driver = Driver::new(app.clone(), ManualTicker::new(), ManualTicker::new(), tx);

        driver.start_timer();
        driver.begin_session();
        driver.timer_ticker_mut().advance(10);
        driver.session_ticker_mut().advance(3);
        driver.pause_timer();
        driver.session_ticker_mut().advance(2);

        let app = lock(&app);
        assert_eq!(app.timer().remaining_secs(), 1490);
        assert_eq!(app.session().elapsed_secs(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_start_waits_for_grace_period() {
        let (tx, _rx) = unbounded_channel();
        let app = shared_app(TimerConfig::default());
        let mut driver = Driver::new(
            app.clone(),
            IntervalTicker::every_second(),
            IntervalTicker::every_second(),
            tx,
        );

        driver.start_timer_after(AUTO_START_DELAY).await;
        assert!(lock(&app).timer().is_running());
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(lock(&app).timer().remaining_secs(), 1497);

        driver.pause_timer();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(lock(&app).timer().remaining_secs(), 1497);
    }
}
