//! Integration tests for the study controller.
//!
//! Drives `StudyApp` end to end over in-memory and on-disk stores, with a
//! manual clock for day rollover and a mocked API server for the remote
//! calls.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use mockito::Matcher;
use serde_json::json;
use studymentor_core::app::CHAT_FALLBACK;
use studymentor_core::api::types::{RoadmapRequest, SkillLevel};
use studymentor_core::storage::MemoryBackend;
use studymentor_core::{
    ApiClient, ApiSettings, Celebration, CoreError, Database, ManualClock, Mode, PersistenceStore,
    StudyApp, TimerConfig,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn morning() -> ManualClock {
    ManualClock::new(Local.with_ymd_and_hms(2026, 4, 20, 8, 30, 0).unwrap())
}

fn api_at(base_url: String) -> ApiClient {
    ApiClient::new(&ApiSettings {
        base_url,
        timeout_secs: 5,
    })
    .unwrap()
}

fn unreachable_api() -> ApiClient {
    api_at("http://127.0.0.1:9".into())
}

fn load(backend: &MemoryBackend, clock: &ManualClock, api: ApiClient) -> StudyApp {
    let store = PersistenceStore::new(backend.clone(), Arc::new(clock.clone()));
    StudyApp::load(store, api).unwrap()
}

/// Put a roadmap id in place the way a successful generation would.
async fn with_roadmap(server: &mut mockito::ServerGuard, app: &mut StudyApp) {
    let _m = server
        .mock("POST", "/api/roadmap/generate")
        .with_status(200)
        .with_body(json!({"roadmap_id": "roadmap_42", "roadmaps": {}}).to_string())
        .create_async()
        .await;
    app.generate_roadmap(&RoadmapRequest {
        learning_goal: "Linear algebra".into(),
        time_commitment: 8,
        skill_level: SkillLevel::Intermediate,
        learning_styles: vec!["reading".into()],
        deadline: None,
        budget: "free".into(),
    })
    .await
    .unwrap();
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_state_survives_restart() {
    let backend = MemoryBackend::new();
    let clock = morning();

    let mut app = load(&backend, &clock, unreachable_api());
    app.select_mode(Mode::Friendly).unwrap();
    app.add_goal("Read ch.1", 30).unwrap();
    app.add_goal("Practice", 45).unwrap();
    app.toggle_goal(1, true).unwrap();
    app.save_timer_settings(TimerConfig {
        work_minutes: 40,
        ..TimerConfig::default()
    })
    .unwrap();
    drop(app);

    let app = load(&backend, &clock, unreachable_api());
    assert_eq!(app.mode(), Some(Mode::Friendly));
    assert_eq!(app.goals().total(), 2);
    assert_eq!(app.goals().completed_count(), 1);
    assert_eq!(app.timer().config().work_minutes, 40);
    assert_eq!(app.timer().remaining_secs(), 40 * 60);
}

#[test]
fn test_goals_and_stats_reset_on_new_day() {
    let backend = MemoryBackend::new();
    let clock = morning();

    let mut app = load(&backend, &clock, unreachable_api());
    app.add_goal("Flashcards", 20).unwrap();
    app.begin_session();
    for _ in 0..180 {
        app.tick_session();
    }
    app.end_session().unwrap();
    app.select_mode(Mode::Focus).unwrap();
    drop(app);

    clock.advance(chrono::Duration::hours(16));
    let app = load(&backend, &clock, unreachable_api());
    assert!(app.goals().is_empty());
    assert_eq!(app.stats().total_minutes(), 0);
    // Not day-scoped.
    assert_eq!(app.mode(), Some(Mode::Focus));
}

#[test]
fn test_on_disk_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studymentor.db");
    let clock = morning();

    {
        let db = Database::open_at(&path).unwrap();
        let store = PersistenceStore::new(db, Arc::new(clock.clone()));
        let mut app = StudyApp::load(store, unreachable_api()).unwrap();
        app.add_goal("Write summary", 25).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    let store = PersistenceStore::new(db, Arc::new(clock));
    let app = StudyApp::load(store, unreachable_api()).unwrap();
    assert_eq!(app.goals().get(0).unwrap().text, "Write summary");
}

#[test]
fn test_corrupt_timer_settings_fall_back_to_defaults() {
    use studymentor_core::storage::{keys, KvBackend};

    let backend = MemoryBackend::new();
    let mut raw = backend.clone();
    raw.set(
        keys::TIMER_SETTINGS,
        r#"{"workMinutes":0,"shortBreakMinutes":5,"longBreakMinutes":15,"sessionsUntilLongBreak":4,"autoStartBreaks":false,"playSound":true}"#,
    )
    .unwrap();

    let app = load(&backend, &morning(), unreachable_api());
    assert_eq!(app.timer().config(), &TimerConfig::default());
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_goal_scenario() {
    let mut app = load(&MemoryBackend::new(), &morning(), unreachable_api());
    app.add_goal("Read ch.1", 30).unwrap();
    app.add_goal("Practice", 45).unwrap();

    assert_eq!(app.toggle_goal(0, true).unwrap(), None);
    assert_eq!(app.goals().completed_count(), 1);
    assert_eq!(app.goals().total(), 2);

    assert_eq!(
        app.toggle_goal(1, true).unwrap(),
        Some(Celebration::AllGoalsCompleted)
    );
    assert_eq!(app.goals().completed_count(), 2);
}

#[test]
fn test_session_scenario_125_seconds() {
    let mut app = load(&MemoryBackend::new(), &morning(), unreachable_api());
    app.begin_session();
    for _ in 0..125 {
        app.tick_session();
    }
    let summary = app.end_session().unwrap();
    assert_eq!(summary.elapsed_secs, 125);
    assert_eq!(app.stats().total_minutes(), 2);
    assert_eq!(app.stats().sessions_completed(), 0);
}

#[test]
fn test_rejected_goal_leaves_store_untouched() {
    let backend = MemoryBackend::new();
    let clock = morning();
    let mut app = load(&backend, &clock, unreachable_api());
    app.add_goal("keep", 10).unwrap();

    assert!(matches!(app.add_goal("  ", 10), Err(CoreError::Validation(_))));
    assert!(matches!(
        app.remove_goal(3),
        Err(CoreError::IndexOutOfRange { index: 3, len: 1, .. })
    ));

    let app = load(&backend, &clock, unreachable_api());
    assert_eq!(app.goals().total(), 1);
}

// ============================================================================
// Remote calls
// ============================================================================

#[tokio::test]
async fn test_chat_failure_returns_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body(r#"{"detail":"boom"}"#)
        .create_async()
        .await;

    let mut app = load(&MemoryBackend::new(), &morning(), api_at(server.url()));
    let reply = app.send_chat("Explain eigenvalues").await;
    assert_eq!(reply.as_deref(), Some(CHAT_FALLBACK));
    assert!(app.chat_history().is_empty());
}

#[tokio::test]
async fn test_chat_sends_current_mode() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({"mode": "friendly"})))
        .with_status(200)
        .with_body(r#"{"response":"Sure! Let's go.","timestamp":"2026-04-20T08:31:00"}"#)
        .create_async()
        .await;

    let mut app = load(&MemoryBackend::new(), &morning(), api_at(server.url()));
    app.select_mode(Mode::Friendly).unwrap();
    let reply = app.send_chat("Help me plan").await;
    assert_eq!(reply.as_deref(), Some("Sure! Let's go."));
    assert_eq!(app.chat_history().len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_roadmap_persists_id() {
    let mut server = mockito::Server::new_async().await;
    let backend = MemoryBackend::new();
    let clock = morning();

    let mut app = load(&backend, &clock, api_at(server.url()));
    with_roadmap(&mut server, &mut app).await;
    assert_eq!(app.roadmap_id(), Some("roadmap_42"));

    let app = load(&backend, &clock, api_at(server.url()));
    assert_eq!(app.roadmap_id(), Some("roadmap_42"));
}

#[tokio::test]
async fn test_log_time_sends_floored_minutes() {
    let mut server = mockito::Server::new_async().await;
    let mut app = load(&MemoryBackend::new(), &morning(), api_at(server.url()));
    with_roadmap(&mut server, &mut app).await;

    let mock = server
        .mock("POST", "/api/progress/update")
        .match_body(Matcher::Json(json!({
            "roadmap_id": "roadmap_42",
            "task_id": "session",
            "completed": false,
            "time_spent": 2
        })))
        .with_status(200)
        .with_body(r#"{"status":"success"}"#)
        .create_async()
        .await;

    let (progress, celebration) = app.log_time(125).await.unwrap();
    assert_eq!(progress, None);
    assert_eq!(celebration, Celebration::TimeLogged { minutes: 2 });
    mock.assert_async().await;
}

#[tokio::test]
async fn test_log_time_returns_refreshed_progress() {
    let mut server = mockito::Server::new_async().await;
    let mut app = load(&MemoryBackend::new(), &morning(), api_at(server.url()));
    with_roadmap(&mut server, &mut app).await;
    let _m = server
        .mock("POST", "/api/progress/update")
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "progress": {
                    "roadmap_id": "roadmap_42",
                    "track": "balanced",
                    "completion_percentage": 12.5,
                    "current_phase": 1,
                    "streak": 3,
                    "total_time_spent": 95,
                    "last_study_date": "2026-04-20"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (progress, celebration) = app.log_time(1800).await.unwrap();
    let progress = progress.unwrap();
    assert_eq!(progress.total_time_spent, 95);
    assert_eq!(progress.streak, 3);
    assert_eq!(celebration, Celebration::TimeLogged { minutes: 30 });
}

#[tokio::test]
async fn test_log_time_failure_leaves_stats_unchanged() {
    let mut server = mockito::Server::new_async().await;
    let mut app = load(&MemoryBackend::new(), &morning(), api_at(server.url()));
    with_roadmap(&mut server, &mut app).await;
    let _m = server
        .mock("POST", "/api/progress/update")
        .with_status(503)
        .create_async()
        .await;

    let before = app.stats().stats();
    let err = app.log_time(600).await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(app.stats().stats(), before);
}

#[tokio::test]
async fn test_manual_time_is_recorded_even_when_sync_fails() {
    let mut app = load(&MemoryBackend::new(), &morning(), unreachable_api());
    assert!(matches!(
        app.log_manual_time(0, 0).await,
        Err(CoreError::Validation(_))
    ));
    assert_eq!(app.stats().total_minutes(), 0);

    let result = app.log_manual_time(1, 15).await;
    assert!(matches!(result, Err(CoreError::NoActiveRoadmap)));
    assert_eq!(app.stats().total_minutes(), 75);
    assert_eq!(app.stats().sessions_completed(), 0);
}

#[tokio::test]
async fn test_techniques_fall_back_when_offline() {
    let app = load(&MemoryBackend::new(), &morning(), unreachable_api());
    let text = app.study_techniques_message().await;
    assert!(text.contains("Pomodoro Technique"));
}

#[tokio::test]
async fn test_adjust_goals_acknowledged() {
    let mut server = mockito::Server::new_async().await;
    let mut app = load(&MemoryBackend::new(), &morning(), api_at(server.url()));
    with_roadmap(&mut server, &mut app).await;
    let _m = server
        .mock("POST", "/api/progress/roadmap_42/adjust")
        .with_status(200)
        .with_body(r#"{"status":"success","message":"Goals adjusted successfully"}"#)
        .create_async()
        .await;

    let (ack, celebration) = app.adjust_goals(5, None).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Goals adjusted successfully"));
    assert_eq!(celebration, Celebration::GoalsAdjusted);
}
